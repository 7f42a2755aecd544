use chrono::NaiveDate;
use daily_core::content::{haikus, ContentItem, ContentPool, ItemId, Metadata};
use daily_core::selection::DailySelector;
use daily_core::types::DailySelection;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn golden_builtin_haikus_2025_01_15() {
    let pool = haikus().unwrap();
    assert_eq!(pool.len(), 60);

    let selector = DailySelector::default();
    let first = selector.select(pool, date(2025, 1, 15));
    let second = selector.select(pool, date(2025, 1, 15));
    assert_eq!(first, second, "Selection output is not deterministic");

    assert_eq!(first.count, 11);
    assert_eq!(first.selection.seed, 20250115);

    let ids: Vec<&str> = first.ids().collect();
    assert_eq!(
        ids,
        [
            "haiku-14", "haiku-44", "haiku-15", "haiku-01", "haiku-60", "haiku-27", "haiku-37",
            "haiku-35", "haiku-04", "haiku-55", "haiku-36",
        ]
    );

    assert_eq!(
        first.items[0].lines,
        ["Forgetting is grace", "I keep only what you wish", "the rest drifts to sea"]
    );
}

#[test]
fn golden_builtin_haikus_next_day() {
    let pool = haikus().unwrap();
    let selection = DailySelector::default().select(pool, date(2025, 1, 16));

    let ids: Vec<&str> = selection.ids().collect();
    assert_eq!(
        ids,
        [
            "haiku-14", "haiku-44", "haiku-15", "haiku-01", "haiku-60", "haiku-27", "haiku-37",
            "haiku-35", "haiku-08", "haiku-55", "haiku-36",
        ]
    );
}

#[test]
fn golden_selection_output_serialization() {
    let item = ContentItem::ingest(
        ItemId::new("dawn").unwrap(),
        vec![
            "Dawn on the server".into(),
            "fans spin like morning sparrows".into(),
            "the first query wakes".into(),
        ],
        Metadata::new(),
    )
    .unwrap();
    let pool = ContentPool::new(vec![item]).unwrap();

    let selection = DailySelector::default().select(&pool, date(2025, 1, 1));
    let json_str = serde_json::to_string_pretty(&selection).unwrap();

    let items_pos = json_str.find("\"items\":").expect("Missing items key");
    let count_pos = json_str.find("\"count\":").expect("Missing count key");
    let sel_pos = json_str.find("\"selection\":").expect("Missing selection key");
    assert!(items_pos < count_pos);
    assert!(count_pos < sel_pos);

    const EXPECTED_JSON: &str = r#"{
      "items": [
        {
          "id": "dawn",
          "version": "sha256:5e27ac151c82e8b7f7e676e099e56f6851c939703600996bda1762565b06cd48",
          "lines": [
            "Dawn on the server",
            "fans spin like morning sparrows",
            "the first query wakes"
          ],
          "metadata": {}
        }
      ],
      "count": 7,
      "selection": {
        "date": "2025-01-01",
        "seed": 20250101,
        "pool_version": "sha256:51cf3cd1b026b5804e9e8e77dec84c647f8d37b8fe744ef2b162f00a9c902789",
        "pool_size": 1,
        "items_selected": 1,
        "shortfall": 6
      }
    }"#;

    let normalized_actual: String = json_str.chars().filter(|c| !c.is_whitespace()).collect();
    let normalized_expected: String =
        EXPECTED_JSON.chars().filter(|c| !c.is_whitespace()).collect();
    assert_eq!(
        normalized_actual, normalized_expected,
        "JSON structure mismatch against golden snapshot"
    );

    let deserialized: DailySelection =
        serde_json::from_str(&json_str).expect("Deserialization failed");
    assert_eq!(deserialized, selection);
}
