/*
 * Unit tests for the shared data structures
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_status_text
 * - test_snapshot_lines
 * - test_direction_parse
 * - test_request_parse
 * - test_snapshot_json
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod structs_tests {
    use crate::shared::{Car, CarStatus, Direction, Request, StatusSnapshot, ValidationError};

    #[test]
    fn test_status_text() {
        // Purpose: Verify the human readable status markers

        // Arrange
        let idle = CarStatus::Idle;
        let moving = CarStatus::Moving { target: 3 };
        let loading = CarStatus::Loading { floor: 4 };

        // Act & Assert
        assert_eq!(idle.to_string(), "idle");
        assert_eq!(moving.to_string(), "Moving to floor 3");
        assert_eq!(loading.to_string(), "Picking up passengers on floor 4");
    }

    #[test]
    fn test_snapshot_lines() {
        // Purpose: Verify that snapshots render one line per car with 1-based car numbers

        // Arrange
        let mut cars = vec![Car::new(0, 1), Car::new(1, 5)];
        cars[1].status = CarStatus::Moving { target: 7 };

        // Act
        let lines = StatusSnapshot::from_cars(&cars).lines();

        // Assert
        assert_eq!(
            lines,
            vec![
                "Car 1 is on floor 1 - Status: idle".to_string(),
                "Car 2 is on floor 5 - Status: Moving to floor 7".to_string(),
            ]
        );
    }

    #[test]
    fn test_direction_parse() {
        // Purpose: Verify direction parsing accepts up/down only

        // Act & Assert
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!(" DOWN ".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(ValidationError::InvalidDirection("sideways".to_string()))
        );
    }

    #[test]
    fn test_request_parse() {
        // Purpose: Verify the FLOOR:DIR request form and its failure modes

        // Act & Assert
        assert_eq!("3:up".parse::<Request>(), Ok(Request::new(3, Direction::Up)));
        assert_eq!("-1:down".parse::<Request>(), Ok(Request::new(-1, Direction::Down)));
        assert_eq!(
            "3.5:up".parse::<Request>(),
            Err(ValidationError::InvalidFloor("3.5".to_string()))
        );
        assert_eq!(
            "3:left".parse::<Request>(),
            Err(ValidationError::InvalidDirection("left".to_string()))
        );
        assert_eq!(
            "3up".parse::<Request>(),
            Err(ValidationError::MalformedRequest("3up".to_string()))
        );
    }

    #[test]
    fn test_snapshot_json() {
        // Purpose: Verify the serialized form of a snapshot

        // Arrange
        let mut cars = vec![Car::new(0, 2)];
        cars[0].status = CarStatus::Loading { floor: 2 };

        // Act
        let json = serde_json::to_value(StatusSnapshot::from_cars(&cars)).unwrap();

        // Assert
        assert_eq!(
            json,
            serde_json::json!({
                "cars": [
                    { "car": 1, "position": 2, "status": { "state": "loading", "floor": 2 } }
                ]
            })
        );
    }
}
