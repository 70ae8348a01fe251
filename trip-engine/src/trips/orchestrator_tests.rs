//! Unit tests for provider fan-out and result merging.

use super::*;
use crate::domain::UserId;
use crate::sources::InMemoryPlaces;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Barrier;
use uuid::Uuid;

fn owner() -> UserId {
    UserId::new(Uuid::from_u128(7))
}

fn origin() -> Coordinate {
    Coordinate::new(48.137, 11.575).unwrap()
}

fn place(id: &str, mode: TransportMode) -> Place {
    Place::new(id, owner(), id, Coordinate::new(48.2, 11.6).unwrap(), mode)
}

/// How a mock provider answers.
#[derive(Clone)]
enum Behaviour {
    /// Look up (duration, cost) by place id.
    Answer(HashMap<PlaceId, (u64, u64)>),
    Fail(TripError),
    /// Never complete.
    Hang,
}

/// Mock provider shared by both transport modes.
struct MockRoutes {
    behaviour: Behaviour,
    rendezvous: Option<Arc<Barrier>>,
    call_count: Mutex<usize>,
    batches: Mutex<Vec<Vec<PlaceId>>>,
}

impl MockRoutes {
    fn new() -> Self {
        Self {
            behaviour: Behaviour::Answer(HashMap::new()),
            rendezvous: None,
            call_count: Mutex::new(0),
            batches: Mutex::new(Vec::new()),
        }
    }

    fn failing(error: TripError) -> Self {
        Self {
            behaviour: Behaviour::Fail(error),
            ..Self::new()
        }
    }

    fn hanging() -> Self {
        Self {
            behaviour: Behaviour::Hang,
            ..Self::new()
        }
    }

    fn with_route(mut self, id: &str, duration_seconds: u64, cost_cents: u64) -> Self {
        if let Behaviour::Answer(routes) = &mut self.behaviour {
            routes.insert(PlaceId::new(id), (duration_seconds, cost_cents));
        }
        self
    }

    /// Wait on `barrier` before answering.
    fn meeting_at(mut self, barrier: Arc<Barrier>) -> Self {
        self.rendezvous = Some(barrier);
        self
    }

    fn api_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    fn batches(&self) -> Vec<Vec<PlaceId>> {
        self.batches.lock().unwrap().clone()
    }

    async fn answer(&self, places: &[Place]) -> Result<Vec<(PlaceId, u64, u64)>, TripError> {
        {
            *self.call_count.lock().unwrap() += 1;
            self.batches
                .lock()
                .unwrap()
                .push(places.iter().map(|p| p.id.clone()).collect());
        }

        if let Some(barrier) = &self.rendezvous {
            barrier.wait().await;
        }

        match &self.behaviour {
            Behaviour::Answer(routes) => Ok(places
                .iter()
                .map(|p| {
                    let (duration, cost) = routes.get(&p.id).copied().unwrap_or((60, 10));
                    (p.id.clone(), duration, cost)
                })
                .collect()),
            Behaviour::Fail(error) => Err(error.clone()),
            Behaviour::Hang => std::future::pending().await,
        }
    }
}

impl CarRoutes for MockRoutes {
    async fn calculate_routes(
        &self,
        places: &[Place],
        _origin: Coordinate,
    ) -> Result<Vec<CarRouteResult>, TripError> {
        let answers = self.answer(places).await?;
        Ok(answers
            .into_iter()
            .map(|(place_id, duration_seconds, cost_cents)| CarRouteResult {
                place_id,
                duration_seconds,
                distance_meters: 1000,
                cost_cents,
            })
            .collect())
    }
}

impl TrainRoutes for MockRoutes {
    async fn calculate_routes(
        &self,
        places: &[Place],
        _origin: Coordinate,
    ) -> Result<Vec<TrainRouteResult>, TripError> {
        let answers = self.answer(places).await?;
        Ok(answers
            .into_iter()
            .map(|(place_id, duration_seconds, cost_cents)| TrainRouteResult {
                place_id,
                duration_seconds,
                cost_cents,
            })
            .collect())
    }
}

fn ids(trips: &[Trip]) -> Vec<&str> {
    trips.iter().map(|t| t.place.id.as_str()).collect()
}

#[tokio::test]
async fn no_places_means_no_provider_calls() {
    let places = InMemoryPlaces::default();
    let car = MockRoutes::new();
    let train = MockRoutes::new();
    let orchestrator = TripOrchestrator::new(&places, &car, &train);

    let trips = orchestrator
        .get_trips(PlaceScope::User(owner()), origin())
        .await
        .unwrap();

    assert!(trips.is_empty());
    assert_eq!(car.api_call_count(), 0);
    assert_eq!(train.api_call_count(), 0);
}

#[tokio::test]
async fn car_only_skips_train_provider() {
    let places = InMemoryPlaces::new(vec![
        place("a", TransportMode::Car),
        place("b", TransportMode::Car),
        place("c", TransportMode::Car),
    ]);
    let car = MockRoutes::new();
    let train = MockRoutes::new();
    let orchestrator = TripOrchestrator::new(&places, &car, &train);

    let trips = orchestrator.get_trips(PlaceScope::All, origin()).await.unwrap();

    assert_eq!(ids(&trips), vec!["a", "b", "c"]);
    assert_eq!(car.api_call_count(), 1);
    assert_eq!(train.api_call_count(), 0);
}

#[tokio::test]
async fn train_only_skips_car_provider() {
    let places = InMemoryPlaces::new(vec![
        place("a", TransportMode::Train),
        place("b", TransportMode::Train),
    ]);
    let car = MockRoutes::new();
    let train = MockRoutes::new();
    let orchestrator = TripOrchestrator::new(&places, &car, &train);

    let trips = orchestrator.get_trips(PlaceScope::All, origin()).await.unwrap();

    assert_eq!(ids(&trips), vec!["a", "b"]);
    assert_eq!(car.api_call_count(), 0);
    assert_eq!(train.api_call_count(), 1);
}

#[tokio::test]
async fn mixed_modes_combine_both_providers() {
    let places = InMemoryPlaces::new(vec![
        place("home", TransportMode::Car),
        place("office", TransportMode::Car),
        place("station", TransportMode::Train),
    ]);
    let car = MockRoutes::new()
        .with_route("home", 600, 150)
        .with_route("office", 420, 90);
    let train = MockRoutes::new().with_route("station", 1200, 300);
    let orchestrator = TripOrchestrator::new(&places, &car, &train);

    let trips = orchestrator.get_trips(PlaceScope::All, origin()).await.unwrap();

    assert_eq!(trips.len(), 3);
    assert_eq!(trips[0].cost, 150);
    assert_eq!(trips[1].cost, 90);
    assert_eq!(trips[2].time, Duration::from_secs(1200));
    assert_eq!(trips[2].cost, 300);

    // Each provider saw only its own mode.
    assert_eq!(
        car.batches(),
        vec![vec![PlaceId::new("home"), PlaceId::new("office")]]
    );
    assert_eq!(train.batches(), vec![vec![PlaceId::new("station")]]);
}

#[tokio::test]
async fn input_order_survives_interleaved_modes() {
    let places = InMemoryPlaces::new(vec![
        place("t1", TransportMode::Train),
        place("c1", TransportMode::Car),
        place("t2", TransportMode::Train),
        place("c2", TransportMode::Car),
    ]);
    let car = MockRoutes::new()
        .with_route("c1", 100, 1)
        .with_route("c2", 200, 2);
    let train = MockRoutes::new()
        .with_route("t1", 300, 3)
        .with_route("t2", 400, 4);
    let orchestrator = TripOrchestrator::new(&places, &car, &train);

    let trips = orchestrator.get_trips(PlaceScope::All, origin()).await.unwrap();

    assert_eq!(ids(&trips), vec!["t1", "c1", "t2", "c2"]);
    let costs: Vec<u16> = trips.iter().map(|t| t.cost).collect();
    assert_eq!(costs, vec![3, 1, 4, 2]);
}

#[tokio::test]
async fn scope_filters_by_owner() {
    let stranger = UserId::new(Uuid::from_u128(99));
    let places = InMemoryPlaces::new(vec![
        place("mine", TransportMode::Car),
        Place::new(
            "theirs",
            stranger,
            "Theirs",
            Coordinate::new(1.0, 1.0).unwrap(),
            TransportMode::Car,
        ),
    ]);
    let car = MockRoutes::new();
    let train = MockRoutes::new();
    let orchestrator = TripOrchestrator::new(&places, &car, &train);

    let trips = orchestrator
        .get_trips(PlaceScope::User(owner()), origin())
        .await
        .unwrap();

    assert_eq!(ids(&trips), vec!["mine"]);
}

#[tokio::test]
async fn car_failure_fails_request_and_drops_train_work() {
    let places = InMemoryPlaces::new(vec![
        place("a", TransportMode::Car),
        place("b", TransportMode::Train),
    ]);
    let car = MockRoutes::failing(TripError::RateLimited {
        provider: Provider::Car,
    });
    // Would block forever if the orchestrator waited for it.
    let train = MockRoutes::hanging();
    let orchestrator = TripOrchestrator::new(&places, &car, &train);

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        orchestrator.get_trips(PlaceScope::All, origin()),
    )
    .await
    .expect("orchestrator waited on the hanging provider");

    assert_eq!(
        result.unwrap_err(),
        TripError::RateLimited {
            provider: Provider::Car
        }
    );
}

#[tokio::test]
async fn train_failure_is_propagated() {
    let places = InMemoryPlaces::new(vec![
        place("a", TransportMode::Car),
        place("b", TransportMode::Train),
    ]);
    let car = MockRoutes::new();
    let train = MockRoutes::failing(TripError::upstream(Provider::Train, "connection refused"));
    let orchestrator = TripOrchestrator::new(&places, &car, &train);

    let err = orchestrator
        .get_trips(PlaceScope::All, origin())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TripError::UpstreamUnavailable {
            provider: Provider::Train,
            ..
        }
    ));
}

#[tokio::test]
async fn providers_run_concurrently() {
    // Each provider waits for the other; sequential execution deadlocks.
    let barrier = Arc::new(Barrier::new(2));
    let places = InMemoryPlaces::new(vec![
        place("a", TransportMode::Car),
        place("b", TransportMode::Train),
    ]);
    let car = MockRoutes::new().meeting_at(barrier.clone());
    let train = MockRoutes::new().meeting_at(barrier);
    let orchestrator = TripOrchestrator::new(&places, &car, &train);

    let trips = tokio::time::timeout(
        Duration::from_secs(5),
        orchestrator.get_trips(PlaceScope::All, origin()),
    )
    .await
    .expect("providers did not run concurrently")
    .unwrap();

    assert_eq!(trips.len(), 2);
}

#[tokio::test]
async fn repeated_requests_give_identical_trips() {
    let places = InMemoryPlaces::new(vec![
        place("a", TransportMode::Car),
        place("b", TransportMode::Train),
    ]);
    let car = MockRoutes::new().with_route("a", 900, 75);
    let train = MockRoutes::new().with_route("b", 1800, 75);
    let orchestrator = TripOrchestrator::new(&places, &car, &train);

    let first = orchestrator.get_trips(PlaceScope::All, origin()).await.unwrap();
    let second = orchestrator.get_trips(PlaceScope::All, origin()).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn cancellation_abandons_pending_providers() {
    let places = InMemoryPlaces::new(vec![
        place("a", TransportMode::Car),
        place("b", TransportMode::Train),
    ]);
    let car = MockRoutes::hanging();
    let train = MockRoutes::hanging();
    let orchestrator = TripOrchestrator::new(&places, &car, &train);

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        orchestrator.get_trips_until(
            PlaceScope::All,
            origin(),
            tokio::time::sleep(Duration::from_millis(20)),
        ),
    )
    .await
    .expect("cancellation was not observed");

    assert_eq!(result.unwrap_err(), TripError::Cancelled);
}

#[tokio::test]
async fn completed_work_wins_over_pending_cancellation() {
    let places = InMemoryPlaces::new(vec![place("a", TransportMode::Car)]);
    let car = MockRoutes::new();
    let train = MockRoutes::new();
    let orchestrator = TripOrchestrator::new(&places, &car, &train);

    let trips = orchestrator
        .get_trips_until(PlaceScope::All, origin(), std::future::pending::<()>())
        .await
        .unwrap();

    assert_eq!(trips.len(), 1);
}

#[test]
fn merge_rejects_result_for_wrong_place() {
    let places = vec![place("a", TransportMode::Car)];
    let car = vec![CarRouteResult {
        place_id: PlaceId::new("z"),
        duration_seconds: 1,
        distance_meters: 1,
        cost_cents: 1,
    }];

    let err = merge(places, car, Vec::new()).unwrap_err();

    assert!(matches!(
        err,
        TripError::MalformedUpstreamResponse {
            provider: Provider::Car,
            ..
        }
    ));
}

#[test]
fn merge_rejects_missing_and_surplus_results() {
    let missing = merge(vec![place("a", TransportMode::Train)], Vec::new(), Vec::new());
    assert!(matches!(
        missing,
        Err(TripError::MalformedUpstreamResponse {
            provider: Provider::Train,
            ..
        })
    ));

    let surplus = merge(
        Vec::new(),
        Vec::new(),
        vec![TrainRouteResult {
            place_id: PlaceId::new("x"),
            duration_seconds: 1,
            cost_cents: 1,
        }],
    );
    assert!(matches!(
        surplus,
        Err(TripError::MalformedUpstreamResponse {
            provider: Provider::Train,
            ..
        })
    ));
}

#[test]
fn merge_saturates_large_costs() {
    let places = vec![place("far", TransportMode::Car)];
    let car = vec![CarRouteResult {
        place_id: PlaceId::new("far"),
        duration_seconds: 10,
        distance_meters: 10,
        cost_cents: 1_000_000,
    }];

    let trips = merge(places, car, Vec::new()).unwrap();

    assert_eq!(trips[0].cost, u16::MAX);
}
