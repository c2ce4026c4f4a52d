use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use uuid::Uuid;

pub const SCHEMA_VERSION: &str = "teamcraft.v1";

/// Per-invocation details attached to a result envelope.
#[derive(Debug, Clone, Serialize, Default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,
    /// One id per CLI invocation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<Uuid>,
}

impl Meta {
    pub fn for_run(run_id: Uuid, started: Instant) -> Self {
        Self { duration_ms: Some(started.elapsed().as_millis()), run_id: Some(run_id) }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub schema_version: &'static str,
    pub time: DateTime<Utc>,
    pub request_id: Uuid,
    pub op: &'static str,
    pub apply: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Envelope {
    pub fn plan<T: Serialize>(op: &'static str, plan: &T, meta: Option<Meta>) -> Result<Self, serde_json::Error> {
        let plan_val = serde_json::to_value(plan)?;
        Ok(Envelope {
            schema_version: SCHEMA_VERSION,
            time: Utc::now(),
            request_id: Uuid::new_v4(),
            op,
            apply: false,
            plan: Some(plan_val),
            result: None,
            meta,
        })
    }

    pub fn result<T: Serialize>(op: &'static str, result: &T, meta: Option<Meta>) -> Result<Self, serde_json::Error> {
        let res_val = serde_json::to_value(result)?;
        Ok(Envelope {
            schema_version: SCHEMA_VERSION,
            time: Utc::now(),
            request_id: Uuid::new_v4(),
            op,
            apply: true,
            plan: None,
            result: Some(res_val),
            meta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialize_plan_envelope() {
        let plan = json!({"count": 2, "sample": ["Bloodbath", "Swiftcast"]});
        let env = Envelope::plan("batch", &plan, None).expect("to serialize plan");
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["schema_version"], "teamcraft.v1");
        assert_eq!(v["op"], "batch");
        assert_eq!(v["apply"], false);
        assert_eq!(v["plan"]["count"], 2);
        assert!(v.get("result").is_none());
    }

    #[test]
    fn serialize_result_envelope() {
        let result = json!({"type": "status", "data": {"name": "Bloodbath"}});
        let run_id = Uuid::new_v4();
        let env = Envelope::result("lookup", &result, Some(Meta::for_run(run_id, Instant::now()))).expect("to serialize result");
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["apply"], true);
        assert_eq!(v["result"]["data"]["name"], "Bloodbath");
        assert!(v["meta"]["duration_ms"].is_u64());
        assert_eq!(v["meta"]["run_id"], run_id.to_string());
        assert_ne!(v["request_id"], v["meta"]["run_id"]);
    }
}

