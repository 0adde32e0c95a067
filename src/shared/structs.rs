/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::ValidationError;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(ValidationError::InvalidDirection(s.to_string())),
        }
    }
}

/**
 * A hall call: someone on `floor` wants to travel in `direction`.
 *
 * Requests are immutable once created. They are either entered by hand or
 * produced by the random request generator.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub floor: i32,
    pub direction: Direction,
}

impl Request {
    pub fn new(floor: i32, direction: Direction) -> Request {
        Request { floor, direction }
    }

    /// Parses a request from its two textual parts, e.g. `("3", "up")`.
    pub fn parse(floor: &str, direction: &str) -> Result<Request, ValidationError> {
        let floor = floor
            .trim()
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidFloor(floor.to_string()))?;
        let direction = direction.parse::<Direction>()?;
        Ok(Request { floor, direction })
    }
}

impl FromStr for Request {
    type Err = ValidationError;

    // Accepts `FLOOR:DIR`, the form used on the command line
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((floor, direction)) => Request::parse(floor, direction),
            None => Err(ValidationError::MalformedRequest(s.to_string())),
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "floor {} ({})", self.floor, self.direction)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CarStatus {
    Idle,
    Moving { target: i32 },
    Loading { floor: i32 },
}

impl CarStatus {
    pub fn is_idle(&self) -> bool {
        *self == CarStatus::Idle
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CarStatus::Idle => f.write_str("idle"),
            CarStatus::Moving { target } => write!(f, "Moving to floor {}", target),
            CarStatus::Loading { floor } => write!(f, "Picking up passengers on floor {}", floor),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Car {
    pub id: usize,
    pub position: i32,
    pub status: CarStatus,
}

impl Car {
    pub fn new(id: usize, position: i32) -> Car {
        Car {
            id,
            position,
            status: CarStatus::Idle,
        }
    }

    pub fn distance_to(&self, floor: i32) -> u64 {
        (i64::from(self.position) - i64::from(floor)).unsigned_abs()
    }
}

/// One line of a status snapshot. `car` is the 1-based car number.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CarReport {
    pub car: usize,
    pub position: i32,
    pub status: CarStatus,
}

impl From<&Car> for CarReport {
    fn from(car: &Car) -> Self {
        CarReport {
            car: car.id + 1,
            position: car.position,
            status: car.status,
        }
    }
}

impl fmt::Display for CarReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Car {} is on floor {} - Status: {}",
            self.car, self.position, self.status
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub cars: Vec<CarReport>,
}

impl StatusSnapshot {
    pub fn from_cars(cars: &[Car]) -> StatusSnapshot {
        StatusSnapshot {
            cars: cars.iter().map(CarReport::from).collect(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.cars.iter().map(|report| report.to_string()).collect()
    }
}
