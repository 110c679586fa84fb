pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_serializes_status() {
        let h = types::Health::ok();
        assert_eq!(h.status, "ok");
        let v = serde_json::to_value(&h).expect("encode");
        assert_eq!(v, serde_json::json!({"status": "ok"}));
    }
}
