use super::*;

use std::time::Duration;

use shared::domain::{Coordinate, TravelMode};

use crate::{
    canvas::{CanvasOptions, MapCanvas},
    houses::HouseGenerator,
    test_support::{ok_response, RecordingRoutingService},
};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

async fn next_completion(
    rx: &mut mpsc::UnboundedReceiver<DirectionsCompletion>,
) -> DirectionsCompletion {
    tokio::time::timeout(RECV_TIMEOUT, rx.recv())
        .await
        .expect("completion in time")
        .expect("channel open")
}

#[tokio::test]
async fn house_click_issues_exactly_one_driving_request() {
    let service = Arc::new(RecordingRoutingService::answering(ok_response(
        "4.4 km", "9 mins",
    )));
    let requests = Arc::clone(&service.requests);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut fetcher = DirectionsFetcher::new(service, tx);

    let mut canvas = MapCanvas::new(HouseGenerator::new(Some(1)), CanvasOptions::default());
    canvas.set_office(Coordinate::new(39.92, 32.85));
    let tagged = canvas
        .click_house(Coordinate::new(39.95, 32.88))
        .expect("request");
    fetcher.start(tagged);

    let completion = next_completion(&mut rx).await;
    assert_eq!(completion.id, tagged.id);
    let response = completion.outcome.expect("response");
    assert!(canvas.apply_directions(completion.id, response));

    let requests = requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].origin, Coordinate::new(39.95, 32.88));
    assert_eq!(requests[0].destination, Coordinate::new(39.92, 32.85));
    assert_eq!(requests[0].travel_mode, TravelMode::Driving);
}

#[tokio::test]
async fn new_request_aborts_the_running_one() {
    let service = Arc::new(
        RecordingRoutingService::answering(ok_response("4.4 km", "9 mins"))
            .with_delay(Duration::from_millis(200)),
    );
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut fetcher = DirectionsFetcher::new(service, tx);

    let mut canvas = MapCanvas::new(HouseGenerator::new(Some(1)), CanvasOptions::default());
    canvas.set_office(Coordinate::new(39.92, 32.85));
    let first = canvas
        .click_house(Coordinate::new(39.95, 32.88))
        .expect("first");
    fetcher.start(first);
    let second = canvas
        .click_house(Coordinate::new(39.90, 32.80))
        .expect("second");
    fetcher.start(second);
    assert_eq!(fetcher.in_flight(), Some(second.id));

    let completion = next_completion(&mut rx).await;
    assert_eq!(completion.id, second.id);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(rx.try_recv().is_err(), "aborted request must not complete");
    assert!(fetcher.in_flight().is_none());
}

#[tokio::test]
async fn transport_failure_is_reported_not_stored() {
    let service = Arc::new(RecordingRoutingService::failing("connection refused"));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut fetcher = DirectionsFetcher::new(service, tx);

    let mut canvas = MapCanvas::new(HouseGenerator::new(Some(1)), CanvasOptions::default());
    canvas.set_office(Coordinate::new(39.92, 32.85));
    let tagged = canvas
        .click_house(Coordinate::new(39.95, 32.88))
        .expect("request");
    fetcher.start(tagged);

    let completion = next_completion(&mut rx).await;
    let err = completion.outcome.expect_err("failure");
    assert!(err.contains("connection refused"));

    canvas.abandon_directions(completion.id);
    assert!(canvas.route().is_none());
    assert!(canvas.awaiting_directions().is_none());
}

#[tokio::test]
async fn cancel_stops_the_running_request() {
    let service = Arc::new(
        RecordingRoutingService::answering(ok_response("4.4 km", "9 mins"))
            .with_delay(Duration::from_millis(200)),
    );
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut fetcher = DirectionsFetcher::new(service, tx);

    fetcher.start(TaggedDirectionsRequest {
        id: RequestId(7),
        request: DirectionsRequest::driving(
            Coordinate::new(39.95, 32.88),
            Coordinate::new(39.92, 32.85),
        ),
    });
    fetcher.cancel();

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn fetch_route_returns_route_only_for_ok() {
    let ok = RecordingRoutingService::answering(ok_response("4.4 km", "9 mins"));
    let request = DirectionsRequest::driving(
        Coordinate::new(39.95, 32.88),
        Coordinate::new(39.92, 32.85),
    );
    let route = fetch_route(&ok, &request).await.expect("fetch");
    assert!(route.is_some());

    let denied = RecordingRoutingService::answering(DirectionsResponse::with_status("NOT_FOUND"));
    assert!(fetch_route(&denied, &request).await.expect("fetch").is_none());
}
