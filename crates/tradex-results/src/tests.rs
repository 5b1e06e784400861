// Normalizer tests for both wire shapes

#[cfg(test)]
mod tests {
    use crate::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use tradex_types::{OptimizationRequest, RawResult, TradexError};

    /// Current-shape payload with `points` entries in every plot
    fn current_payload(points: usize) -> Value {
        let objective_plot: Vec<f64> = (0..points).map(|i| 3600.0 - i as f64).collect();
        let l_plot: Vec<[f64; 3]> = (0..points).map(|i| [350.0 + i as f64; 3]).collect();
        let p_plot: Vec<[f64; 3]> = (0..points).map(|i| [38.0 + i as f64, 35.0, 42.0]).collect();
        let sd_plot: Vec<[f64; 2]> = (0..points).map(|_| [610.4, 610.3]).collect();

        json!({
            "objective": 1745.4,
            "l": [423.94, 423.93, 423.93],
            "p": [203.48, 203.48, 203.47],
            "q": [
                [38.12, 38.12, 38.12],
                [34.38, 34.37, 34.37],
                [36.28, 36.28, 36.28],
                [36.28, 36.28, 36.28],
                [29.21, 29.21, 29.21],
                [29.21, 29.21, 29.21]
            ],
            "objective_plot": objective_plot,
            "l_plot": l_plot,
            "p_plot": p_plot,
            "sd_plot": sd_plot,
        })
    }

    fn legacy_payload() -> Value {
        json!({
            "objective": 1745.4,
            "prices": [423.94, 423.93, 423.93],
            "productions": [203.0, 201.0, 206.0],
            "demands": [[100.0, 100.0, 100.0], [10.0, 0.0, 0.0]],
            "iterations_performed": 57,
        })
    }

    fn malformed_message(err: TradexError) -> String {
        match err {
            TradexError::MalformedResult(msg) => msg,
            other => panic!("expected MalformedResult, got {:?}", other),
        }
    }

    #[test]
    fn test_current_shape_normalizes() {
        let raw = RawResult::from(current_payload(101));
        let result = normalize(&raw).unwrap();

        assert_eq!(result.iterations_performed, 100);
        assert_eq!(result.max_iterations_requested, 100);
        assert_eq!(result.objective, 1745.4);
        assert_eq!(result.prices, vec![423.94, 423.93, 423.93]);
        assert_eq!(result.productions, vec![203.48, 203.48, 203.47]);
        assert_eq!(result.demands.len(), 6);
        assert!(result.demands.iter().all(|row| row.len() == 3));

        assert_eq!(result.objective_plot.len(), 101);
        assert_eq!(result.price_plot.len(), 101);
        assert_eq!(result.production_plot.len(), 101);
        assert_eq!(result.supply_demand_plot.len(), 101);
        assert_eq!(result.objective_plot[0], 3600.0);
        assert_eq!(result.price_plot[100], [450.0; 3]);
        assert_eq!(result.production_plot[1], [39.0, 35.0, 42.0]);
    }

    #[test]
    fn test_submission_records_requested_cap() {
        let raw = RawResult::from(current_payload(51));
        let request = OptimizationRequest::new(1000).unwrap();
        let result = normalize_submission(&raw, request).unwrap();

        assert_eq!(result.iterations_performed, 50);
        assert_eq!(result.max_iterations_requested, 1000);
    }

    #[test]
    fn test_legacy_shape_degrades_to_single_point() {
        let raw = RawResult::from(legacy_payload());
        assert_eq!(detect_shape(&raw).unwrap(), WireShape::Legacy);

        let result = normalize(&raw).unwrap();

        assert_eq!(result.iterations_performed, 57);
        assert_eq!(result.objective_plot, vec![1745.4]);
        assert_eq!(result.price_plot, vec![[423.94, 423.93, 423.93]]);
        assert_eq!(result.production_plot, vec![[203.0, 201.0, 206.0]]);
        assert_eq!(result.supply_demand_plot, vec![[610.0, 310.0]]);
        assert!(result.is_single_point());
    }

    #[test]
    fn test_degraded_balance_matches_result_totals() {
        let result = normalize(&RawResult::from(legacy_payload())).unwrap();

        assert_eq!(
            result.supply_demand_plot,
            vec![[result.total_supply(), result.total_demand()]]
        );
        // Reported count survives even though only one point is plotted
        assert_eq!(result.plot_len(), 1);
        assert_ne!(result.iterations_performed as usize + 1, result.plot_len());
    }

    #[test]
    fn test_short_price_vector_degrades_to_zero_triple() {
        let raw = RawResult::from(json!({
            "objective": 12.0,
            "prices": [424.0],
            "productions": [203.0, 201.0, 206.0],
            "demands": [[1.0, 1.0, 1.0]],
        }));
        let result = normalize(&raw).unwrap();

        assert_eq!(result.price_plot, vec![[0.0, 0.0, 0.0]]);
        assert_eq!(result.prices, vec![424.0]);
        assert_eq!(result.iterations_performed, 0);
    }

    #[test]
    fn test_prices_and_productions_may_differ_in_length() {
        let mut payload = current_payload(4);
        payload["l"] = json!([424.0, 424.0, 424.0, 424.0, 424.0]);
        let result = normalize(&RawResult::from(payload)).unwrap();

        assert_eq!(result.prices.len(), 5);
        assert_eq!(result.productions.len(), 3);
    }

    #[test]
    fn test_current_shape_without_plots_degrades() {
        // Freshly initialized ledgers store l/p/q with null traces
        let raw = RawResult::from(json!({
            "objective": 0.0,
            "l": [0.0, 0.0, 0.0],
            "p": [0.0, 0.0, 0.0],
            "q": [[0.0, 0.0, 0.0], [0.0, 0.0, 0.0]],
            "iterations_performed": 0,
            "objective_plot": null,
            "l_plot": null,
            "p_plot": null,
            "sd_plot": null,
        }));
        assert_eq!(detect_shape(&raw).unwrap(), WireShape::Current);

        let result = normalize(&raw).unwrap();
        assert_eq!(result.objective_plot, vec![0.0]);
        assert_eq!(result.supply_demand_plot, vec![[0.0, 0.0]]);
    }

    #[test]
    fn test_mismatched_plot_lengths_rejected() {
        let mut payload = current_payload(101);
        payload["sd_plot"] = json!(vec![[610.0, 610.0]; 90]);

        let msg = malformed_message(normalize(&RawResult::from(payload)).unwrap_err());
        assert!(msg.contains("sd_plot=90"), "{}", msg);
        assert!(msg.contains("objective_plot=101"), "{}", msg);
    }

    #[test]
    fn test_partial_plots_rejected() {
        let mut payload = current_payload(10);
        payload.as_object_mut().unwrap().remove("p_plot");

        let msg = malformed_message(normalize(&RawResult::from(payload)).unwrap_err());
        assert!(msg.contains("p_plot"), "{}", msg);
    }

    #[test]
    fn test_empty_plots_rejected() {
        let payload = current_payload(0);
        malformed_message(normalize(&RawResult::from(payload)).unwrap_err());
    }

    #[test]
    fn test_reported_iterations_must_match_plots() {
        let mut payload = current_payload(51);
        payload["iterations_performed"] = json!(50);
        assert_eq!(normalize(&RawResult::from(payload.clone())).unwrap().iterations_performed, 50);

        payload["iterations_performed"] = json!(49);
        malformed_message(normalize(&RawResult::from(payload)).unwrap_err());
    }

    #[test]
    fn test_wrong_tuple_arity_rejected() {
        let mut payload = current_payload(3);
        payload["l_plot"] = json!([[1.0, 2.0], [1.0, 2.0], [1.0, 2.0]]);

        let msg = malformed_message(normalize(&RawResult::from(payload)).unwrap_err());
        assert!(msg.contains("Current"), "{}", msg);
    }

    #[test]
    fn test_ragged_demand_matrix_rejected() {
        let mut payload = legacy_payload();
        payload["demands"] = json!([[1.0, 1.0, 1.0], [1.0, 1.0]]);

        let msg = malformed_message(normalize(&RawResult::from(payload)).unwrap_err());
        assert!(msg.contains("demand row 1"), "{}", msg);
    }

    #[test]
    fn test_unknown_shape_rejected() {
        for payload in [
            json!({"objective": 1.0, "l": [1.0]}),
            json!({"price": [1.0], "production": [1.0], "demand": [[1.0]]}),
            json!([1, 2, 3]),
            json!("Optimize ok"),
        ] {
            malformed_message(normalize(&RawResult::from(payload)).unwrap_err());
        }
    }

    #[test]
    fn test_missing_objective_rejected() {
        let mut payload = legacy_payload();
        payload.as_object_mut().unwrap().remove("objective");
        malformed_message(normalize(&RawResult::from(payload)).unwrap_err());
    }

    #[test]
    fn test_current_shape_preferred_when_both_present() {
        let mut payload = current_payload(2);
        payload["prices"] = json!([1.0]);
        payload["productions"] = json!([1.0]);
        payload["demands"] = json!([[1.0]]);

        let raw = RawResult::from(payload);
        assert_eq!(detect_shape(&raw).unwrap(), WireShape::Current);
        assert_eq!(normalize(&raw).unwrap().prices, vec![423.94, 423.93, 423.93]);
    }

    proptest! {
        #[test]
        fn prop_plot_length_determines_iterations(points in 1usize..300) {
            let result = normalize(&RawResult::from(current_payload(points))).unwrap();
            prop_assert_eq!(result.iterations_performed as usize, points - 1);
            prop_assert_eq!(result.plot_len(), points);
        }
    }
}
