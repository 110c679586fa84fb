//! Records shared by the repository, service and HTTP tests.

use models::ConfigRecord;

pub const CONFIG_NAME_1: &str = "config1";
pub const CONFIG_NAME_2: &str = "config2";
pub const CONFIG_NAME_3: &str = "burger-nutrition";

/// Three records: two sharing `abc = "123"`, one with nested nutrition facts.
pub fn in_memory_test_data() -> Vec<ConfigRecord> {
    let raw: [(&str, &[u8]); 3] = [
        (
            CONFIG_NAME_1,
            br#"{
                "foo": "bar",
                "abc": "123",
                "obj": {
                    "aaa": "bbb"
                }
            }"#,
        ),
        (
            CONFIG_NAME_2,
            br#"{
                "enabled": "true",
                "abc": "123",
                "obj": {
                    "aaa": {
                        "bbb": "ccc"
                    }
                }
            }"#,
        ),
        (
            CONFIG_NAME_3,
            br#"{
                "calories": "230",
                "fats": {
                    "saturated-fat": "0g",
                    "trans-fat": "1g"
                },
                "carbohydrates": {
                    "dietary-fiber": "4g",
                    "sugars": "1g"
                },
                "allergens": {
                    "nuts": "false",
                    "seafood": "false",
                    "eggs": "true"
                }
            }"#,
        ),
    ];
    raw.into_iter()
        .map(|(name, metadata)| ConfigRecord::from_json_bytes(name, metadata).expect("fixture metadata is valid json"))
        .collect()
}
