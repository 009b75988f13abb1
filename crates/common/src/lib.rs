//! Shared plumbing for the workspace: logging setup, health payload and
//! Prometheus text encoding.

pub mod types;
pub mod utils;
pub mod metrics;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn health_serializes_status() {
        let v = serde_json::to_value(types::Health { status: "ok" }).expect("serialize");
        assert_eq!(v["status"], "ok");
    }
}
