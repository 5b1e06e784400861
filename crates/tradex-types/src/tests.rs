// Tests for request parsing and result helpers

#[cfg(test)]
mod tests {
    use crate::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_missing_field_defaults_to_cap() {
        let req = OptimizationRequest::from_field(None).unwrap();
        assert_eq!(req.iterations_to_run, DEFAULT_ITERATIONS);
        assert_eq!(req.iterations_to_run, 1000);
    }

    #[test]
    fn test_empty_body_defaults_to_cap() {
        assert_eq!(OptimizationRequest::from_body(b"").unwrap().iterations_to_run, 1000);
        assert_eq!(OptimizationRequest::from_body(b"  \n").unwrap().iterations_to_run, 1000);
        assert_eq!(OptimizationRequest::from_body(b"{}").unwrap().iterations_to_run, 1000);
    }

    #[test]
    fn test_numeric_string_accepted() {
        let req = OptimizationRequest::from_body(br#"{"iterations_to_run": " 250 "}"#).unwrap();
        assert_eq!(req.iterations_to_run, 250);
        assert_eq!(req.to_argument(), "250");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad = [
            json!(0),
            json!(-3),
            json!(2.5),
            json!("abc"),
            json!(null),
            json!([10]),
            json!(u64::from(u32::MAX) + 1),
        ];

        for value in bad {
            let err = OptimizationRequest::from_field(Some(&value)).unwrap_err();
            assert!(
                matches!(err, TradexError::Validation(_)),
                "{} should be rejected, got {:?}",
                value,
                err
            );
        }
    }

    #[test]
    fn test_non_object_body_rejected() {
        let err = OptimizationRequest::from_body(b"[1,2]").unwrap_err();
        assert!(matches!(err, TradexError::Validation(_)));

        let err = OptimizationRequest::from_body(b"{not json").unwrap_err();
        assert!(matches!(err, TradexError::Validation(_)));
    }

    #[test]
    fn test_raw_result_rejects_non_json() {
        let err = RawResult::from_bytes(b"Optimize ok").unwrap_err();
        assert!(matches!(err, TradexError::MalformedResult(_)));

        let raw = RawResult::from_bytes(br#"{"objective": 1.5}"#).unwrap();
        assert_eq!(raw.as_value()["objective"], json!(1.5));
    }

    #[test]
    fn test_canonical_totals() {
        let result = CanonicalResult {
            objective: 10.0,
            prices: vec![4.0, 4.0],
            productions: vec![1.0, 2.0, 3.0],
            demands: vec![vec![1.0, 1.0, 1.0], vec![0.5, 0.5, 0.5]],
            iterations_performed: 0,
            max_iterations_requested: 0,
            objective_plot: vec![10.0],
            price_plot: vec![[4.0, 4.0, 0.0]],
            production_plot: vec![[1.0, 2.0, 3.0]],
            supply_demand_plot: vec![[6.0, 4.5]],
        };

        assert_eq!(result.total_supply(), 6.0);
        assert_eq!(result.total_demand(), 4.5);
        assert!(result.is_single_point());
    }

    #[test]
    fn test_client_error_classification() {
        assert!(TradexError::Validation("x".into()).is_client_error());
        assert!(TradexError::NotFound("x".into()).is_client_error());
        assert!(!TradexError::Connection("x".into()).is_client_error());
        assert!(!TradexError::MalformedResult("x".into()).is_client_error());
    }

    proptest! {
        #[test]
        fn prop_positive_integers_pass_through(n in 1u32..=u32::MAX) {
            let req = OptimizationRequest::from_field(Some(&json!(n))).unwrap();
            prop_assert_eq!(req.iterations_to_run, n);
            prop_assert_eq!(req.to_argument(), n.to_string());
        }

        #[test]
        fn prop_non_positive_integers_rejected(n in i64::MIN..=0i64) {
            let result = OptimizationRequest::from_field(Some(&json!(n)));
            prop_assert!(matches!(result, Err(TradexError::Validation(_))));
        }
    }
}
