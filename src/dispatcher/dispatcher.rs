/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};
use std::collections::BTreeMap;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{Config, TimingConfig};
use crate::dispatcher::broadcast::{StatusBroadcaster, SubscriberId, Subscription};
use crate::dispatcher::generator::RequestGenerator;
use crate::dispatcher::movement::{self, Leg};
use crate::dispatcher::timers::{TimerEvent, TimerQueue};
use crate::shared::{Car, ConfigError, Direction, Request, StatusSnapshot, Tick, ValidationError};

/**
 * The elevator bank.
 *
 * Owns every car and decides which car serves which hall call. Time only moves
 * when `advance`/`advance_to` is called. All travel, loading and broadcast
 * wake-ups are entries in the timer queue and fire in tick order.
 *
 * # Fields
 * - `cars`:            The N cars, indexed by id. N is fixed at construction.
 * - `floor_queues`:    Directions requested per floor. Only ever appended to.
 * - `request_log`:     Every accepted request, in arrival order.
 * - `timers`:          Pending travel, loading and broadcast wake-ups.
 * - `broadcaster`:     Fans status snapshots out to subscribers.
 * - `generator`:       Source of random requests.
 * - `timing`:          Travel, loading and broadcast durations.
 * - `min_floor`:       Lowest floor accepted by `submit_request`.
 * - `max_floor`:       Highest floor accepted by `submit_request`.
 * - `now`:             Current simulation time.
 */
#[derive(Debug)]
pub struct Dispatcher {
    cars: Vec<Car>,
    floor_queues: BTreeMap<i32, Vec<Direction>>,
    request_log: Vec<Request>,
    timers: TimerQueue,
    broadcaster: StatusBroadcaster,
    generator: RequestGenerator,
    timing: TimingConfig,
    min_floor: i32,
    max_floor: i32,
    now: Tick,
}

impl Dispatcher {
    /// Builds a bank of idle cars. The config is validated first: a zero
    /// broadcast period or an empty floor range is refused here.
    pub fn new(config: &Config) -> Result<Dispatcher, ConfigError> {
        config.validate()?;

        let cars = (0..config.bank.n_cars)
            .map(|id| Car::new(id, config.bank.initial_floor))
            .collect::<Vec<Car>>();

        let mut timers = TimerQueue::new();
        timers.schedule(
            Tick::ZERO + config.timing.broadcast_period,
            TimerEvent::Broadcast,
        );

        Ok(Dispatcher {
            broadcaster: StatusBroadcaster::new(),
            generator: RequestGenerator::new(
                config.bank.min_floor,
                config.bank.max_floor,
                config.generator.seed,
            ),
            cars,
            floor_queues: BTreeMap::new(),
            request_log: Vec::new(),
            timers,
            timing: config.timing.clone(),
            min_floor: config.bank.min_floor,
            max_floor: config.bank.max_floor,
            now: Tick::ZERO,
        })
    }

    /***************************************/
    /*              Requests               */
    /***************************************/

    /// Records a hall call and hands it to the nearest idle car, if any.
    /// A call that finds no idle car stays queued and is not retried.
    pub fn submit_request(&mut self, floor: i32, direction: Direction) -> Result<(), ValidationError> {
        self.validate_floor(floor)?;

        let request = Request::new(floor, direction);
        self.floor_queues.entry(floor).or_default().push(direction);
        self.request_log.push(request);
        info!("Request received: {}", request);

        self.assign(floor, direction);
        Ok(())
    }

    pub fn submit(&mut self, request: Request) -> Result<(), ValidationError> {
        self.submit_request(request.floor, request.direction)
    }

    /// Draws a random request and submits it. Returns the request.
    pub fn generate_random_request(&mut self) -> Request {
        let request = self.generator.next_request();
        if let Err(e) = self.submit(request) {
            // Generator and validation share one floor range
            warn!("Generated request rejected: {}", e);
        }
        request
    }

    pub(crate) fn assign(&mut self, floor: i32, direction: Direction) -> Option<usize> {
        match nearest_idle_car(&self.cars, floor) {
            Some(car) => {
                debug!(
                    "Assigning car {} at floor {} to floor {} ({})",
                    car + 1,
                    self.cars[car].position,
                    floor,
                    direction
                );
                self.dispatch(car, floor);
                Some(car)
            }
            None => {
                debug!("No idle car for floor {} ({}), request left pending", floor, direction);
                None
            }
        }
    }

    fn dispatch(&mut self, car: usize, target: i32) {
        debug_assert_eq!(self.timers.pending_for(car), 0);

        let (status, travel_time) = movement::depart(&self.cars[car], target, &self.timing);
        self.cars[car].status = status;
        self.timers.schedule(
            self.now + travel_time,
            TimerEvent::Leg { car, leg: Leg::Travel },
        );
    }

    fn validate_floor(&self, floor: i32) -> Result<(), ValidationError> {
        if (self.min_floor..=self.max_floor).contains(&floor) {
            Ok(())
        } else {
            Err(ValidationError::FloorOutOfRange {
                floor,
                min: self.min_floor,
                max: self.max_floor,
            })
        }
    }

    /***************************************/
    /*                Clock                */
    /***************************************/
    pub fn advance(&mut self, units: u64) {
        self.advance_to(self.now + units);
    }

    /// Fires every timer due at or before `target`, including ones scheduled
    /// along the way, then moves the clock to `target`.
    pub fn advance_to(&mut self, target: Tick) {
        while let Some(tick) = self.timers.next_tick() {
            if tick > target {
                break;
            }
            self.now = tick;
            for event in self.timers.drain_tick(tick) {
                self.handle_event(event);
            }
        }
        if target > self.now {
            self.now = target;
        }
    }

    fn handle_event(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Broadcast => {
                self.publish();
                self.timers.schedule(
                    self.now + self.timing.broadcast_period,
                    TimerEvent::Broadcast,
                );
            }
            TimerEvent::Leg { car, leg } => self.complete_leg(car, leg),
        }
    }

    fn complete_leg(&mut self, car: usize, leg: Leg) {
        let transition = match movement::on_leg_complete(&self.cars[car], leg, &self.timing) {
            Some(transition) => transition,
            None => {
                warn!("Car {} got a stale {:?} timer while {}", car + 1, leg, self.cars[car].status);
                return;
            }
        };

        self.cars[car].position = transition.position;
        self.cars[car].status = transition.status;

        match transition.next {
            Some((next_leg, duration)) => {
                info!("{}: car {} arrived at floor {}", self.now, car + 1, transition.position);
                self.timers.schedule(
                    self.now + duration,
                    TimerEvent::Leg { car, leg: next_leg },
                );
            }
            None => {
                info!("{}: car {} is idle at floor {}", self.now, car + 1, transition.position);
                self.publish();
            }
        }
    }

    /***************************************/
    /*               Status                */
    /***************************************/
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot::from_cars(&self.cars)
    }

    pub fn subscribe(&mut self) -> Subscription {
        let current = self.snapshot();
        self.broadcaster.subscribe(current)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.broadcaster.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.broadcaster.subscriber_count()
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.broadcaster.publish(snapshot);
    }

    /***************************************/
    /*              Accessors              */
    /***************************************/
    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn floor_queue(&self, floor: i32) -> &[Direction] {
        self.floor_queues
            .get(&floor)
            .map(|queue| queue.as_slice())
            .unwrap_or(&[])
    }

    pub fn floor_queues(&self) -> &BTreeMap<i32, Vec<Direction>> {
        &self.floor_queues
    }

    pub fn request_log(&self) -> &[Request] {
        &self.request_log
    }

    pub fn pending_timers(&self, car: usize) -> usize {
        self.timers.pending_for(car)
    }
}

/// Index of the idle car closest to `floor`. Ties go to the lowest index.
pub fn nearest_idle_car(cars: &[Car], floor: i32) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;
    for car in cars.iter().filter(|car| car.status.is_idle()) {
        let distance = car.distance_to(floor);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((car.id, distance)),
        }
    }
    best.map(|(id, _)| id)
}
