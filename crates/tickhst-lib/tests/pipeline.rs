//! CSV ticks in, history file out.

use tickhst_lib::prelude::*;
use tickhst_lib::{BarRecord, HEADER_SIZE, Header, RECORD_SIZE};

const TICKS: &str = "\
timestamp,ask,bid,ask_volume,bid_volume
2024-01-15 12:00:01.000,1.10012,1.10000,1.00,1.00
2024-01-15 12:20:00.500,1.10062,1.10050,0.50,0.50
2024-01-15 12:59:59.999,1.10002,1.09990,2.00,1.00
2024-01-15 14:05:00.000,1.10102,1.10090,0.30,0.30
";

#[tokio::test]
async fn test_csv_to_hst() {
    let dir = tempfile::tempdir().unwrap();
    let ticks = read_ticks_csv(TICKS.as_bytes(), "EURUSD").await.unwrap();

    let timeframe = Timeframe::Hour1;
    let config = ConverterConfig::new(timeframe.minutes(), 2, "EURUSD", dir.path());
    let converter = HstConverter::create(config).unwrap();

    let mut bucketer = TickBucketer::new(timeframe.minutes());
    for tick in ticks {
        if let Some(batch) = bucketer.push(tick) {
            converter.pack_ticks(batch.bucket_start, &batch.ticks).await.unwrap();
        }
    }
    if let Some(batch) = bucketer.finish() {
        converter.pack_ticks(batch.bucket_start, &batch.ticks).await.unwrap();
    }
    let summary = converter.finish().await.unwrap();
    assert_eq!(summary.bars_written, 2);

    let bytes = std::fs::read(dir.path().join("EURUSD60.hst")).unwrap();
    assert_eq!(bytes.len(), HEADER_SIZE + 2 * RECORD_SIZE);
    assert_eq!(Header::decode(&bytes[..HEADER_SIZE]).unwrap().symbol(), "EURUSD");

    let first = BarRecord::decode(&bytes[HEADER_SIZE..HEADER_SIZE + RECORD_SIZE]).unwrap();
    assert_eq!(first.time, 1_705_320_000);
    assert_eq!(first.tick_volume, 6);
    assert_eq!(first.close, 1.09990);

    // The 13:00 hour had no ticks and is skipped.
    let second = BarRecord::decode(&bytes[HEADER_SIZE + RECORD_SIZE..]).unwrap();
    assert_eq!(second.time, 1_705_327_200);
    assert_eq!(second.tick_volume, 0);
}
