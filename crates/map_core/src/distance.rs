use shared::protocol::RouteResult;

/// Text shown for the first leg of the first route.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceSummary {
    pub distance_text: String,
    pub duration_text: String,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub summary: Option<String>,
}

impl DistanceSummary {
    pub fn from_result(result: &RouteResult) -> Option<Self> {
        let route = result.routes.first()?;
        let leg = route.legs.first()?;
        Some(Self {
            distance_text: leg.distance.text.clone(),
            duration_text: leg.duration.text.clone(),
            distance_meters: leg.distance.value,
            duration_seconds: leg.duration.value,
            summary: (!route.summary.is_empty()).then(|| route.summary.clone()),
        })
    }

    pub fn lines(&self) -> [String; 2] {
        [
            format!("Distance: {}", self.distance_text),
            format!("Duration: {}", self.duration_text),
        ]
    }
}

/// Lines for the distance panel; empty when no route is stored.
pub fn render_distance(result: Option<&RouteResult>) -> Vec<String> {
    result
        .and_then(DistanceSummary::from_result)
        .map(|summary| summary.lines().to_vec())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::protocol::{EncodedPolyline, Leg, Route, TextValue};

    fn result_with(distance: &str, duration: &str) -> RouteResult {
        RouteResult {
            routes: vec![Route {
                summary: "O-20".into(),
                legs: vec![Leg {
                    distance: TextValue {
                        text: distance.into(),
                        value: 8_400.0,
                    },
                    duration: TextValue {
                        text: duration.into(),
                        value: 960.0,
                    },
                    start_address: None,
                    end_address: None,
                    start_location: None,
                    end_location: None,
                }],
                overview_polyline: EncodedPolyline::default(),
                warnings: Vec::new(),
            }],
        }
    }

    #[test]
    fn renders_nothing_without_route() {
        assert!(render_distance(None).is_empty());
    }

    #[test]
    fn renders_first_leg_text() {
        let result = result_with("8.4 km", "16 mins");
        assert_eq!(
            render_distance(Some(&result)),
            vec!["Distance: 8.4 km".to_string(), "Duration: 16 mins".to_string()]
        );
        let summary = DistanceSummary::from_result(&result).expect("summary");
        assert_eq!(summary.summary.as_deref(), Some("O-20"));
        assert_eq!(summary.duration_seconds, 960.0);
    }

    #[test]
    fn route_without_legs_renders_nothing() {
        let mut result = result_with("1 km", "1 min");
        result.routes[0].legs.clear();
        assert!(render_distance(Some(&result)).is_empty());
    }
}
