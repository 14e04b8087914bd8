use serde::{Deserialize, Serialize};

/// The outcome of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// True when the target answered with HTTP 200.
    pub success: bool,
}

impl CheckResult {
    pub fn from_status(status: u16) -> Self {
        CheckResult {
            success: status == 200,
        }
    }

    pub fn failed() -> Self {
        CheckResult { success: false }
    }
}

/// The aggregate outcome of a run.
/// Results are kept in the order they were collected, which does not have to match launch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub results: Vec<CheckResult>,
}

impl TestResult {
    pub fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of successful checks.
    pub fn successful(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Share of successful checks among the collected results, in percent.
    /// An empty run reports 0.0.
    pub fn success_percentage(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.successful() as f64 / self.results.len() as f64 * 100.0
    }
}

impl FromIterator<CheckResult> for TestResult {
    fn from_iter<I: IntoIterator<Item = CheckResult>>(iter: I) -> Self {
        TestResult {
            results: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_200_counts_as_success() {
        assert!(CheckResult::from_status(200).success);
        assert!(!CheckResult::from_status(201).success);
        assert!(!CheckResult::from_status(301).success);
        assert!(!CheckResult::from_status(500).success);
    }

    #[test]
    fn test_success_percentage_alternating() {
        let result: TestResult = [200, 500, 200, 500]
            .into_iter()
            .map(CheckResult::from_status)
            .collect();

        assert_eq!(result.successful(), 2);
        assert_eq!(format!("{:.2}", result.success_percentage()), "50.00");
    }

    #[test]
    fn test_success_percentage_empty_is_zero() {
        let result = TestResult::default();
        assert!(result.is_empty());
        assert_eq!(result.success_percentage(), 0.0);
    }

    #[test]
    fn test_json_shape() {
        let result: TestResult = std::iter::repeat_n(CheckResult { success: true }, 2).collect();
        let json = serde_json::to_string(&result).expect("serialize");
        assert_eq!(json, r#"{"results":[{"success":true},{"success":true}]}"#);
    }

    #[test]
    fn test_json_round_trip_keeps_successes() {
        let result: TestResult = [true, false, true, true, false, false, true]
            .into_iter()
            .map(|success| CheckResult { success })
            .collect();

        let json = serde_json::to_vec(&result).expect("serialize");
        let parsed: TestResult = serde_json::from_slice(&json).expect("deserialize");

        assert_eq!(parsed.len(), 7);
        assert_eq!(parsed.successful(), 4);
    }
}
