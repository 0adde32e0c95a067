/*
 * Unit tests for the status broadcaster
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_broadcast_primes_subscriber
 * - test_broadcast_fan_out_in_order
 * - test_broadcast_unsubscribe
 * - test_broadcast_prunes_dropped
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod broadcast_tests {
    use crate::dispatcher::broadcast::StatusBroadcaster;
    use crate::shared::{Car, CarStatus, StatusSnapshot};
    use crossbeam_channel::TryRecvError;

    fn snapshot_at(position: i32) -> StatusSnapshot {
        StatusSnapshot::from_cars(&[Car::new(0, position)])
    }

    #[test]
    fn test_broadcast_primes_subscriber() {
        // Purpose: Verify that a new subscriber gets the current snapshot straight away

        // Arrange
        let mut broadcaster = StatusBroadcaster::new();

        // Act
        let subscription = broadcaster.subscribe(snapshot_at(1));

        // Assert
        assert_eq!(subscription.snapshot_rx.try_recv(), Ok(snapshot_at(1)));
        assert_eq!(subscription.snapshot_rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_broadcast_fan_out_in_order() {
        // Purpose: Verify that every subscriber sees every snapshot in publication order

        // Arrange
        let mut broadcaster = StatusBroadcaster::new();
        let first = broadcaster.subscribe(snapshot_at(1));
        let second = broadcaster.subscribe(snapshot_at(1));
        first.snapshot_rx.try_recv().unwrap();
        second.snapshot_rx.try_recv().unwrap();

        let mut loading = vec![Car::new(0, 3)];
        loading[0].status = CarStatus::Loading { floor: 3 };

        // Act
        broadcaster.publish(snapshot_at(2));
        broadcaster.publish(StatusSnapshot::from_cars(&loading));

        // Assert
        assert_ne!(first.id, second.id);
        for subscription in [&first, &second] {
            assert_eq!(subscription.snapshot_rx.try_recv(), Ok(snapshot_at(2)));
            assert_eq!(
                subscription.snapshot_rx.try_recv(),
                Ok(StatusSnapshot::from_cars(&loading))
            );
        }
    }

    #[test]
    fn test_broadcast_unsubscribe() {
        // Purpose: Verify that unsubscribing stops only that subscriber's feed

        // Arrange
        let mut broadcaster = StatusBroadcaster::new();
        let leaving = broadcaster.subscribe(snapshot_at(1));
        let staying = broadcaster.subscribe(snapshot_at(1));

        // Act
        assert!(broadcaster.unsubscribe(leaving.id));
        assert!(!broadcaster.unsubscribe(leaving.id));
        broadcaster.publish(snapshot_at(5));

        // Assert
        assert_eq!(leaving.snapshot_rx.try_recv(), Ok(snapshot_at(1)));
        assert_eq!(leaving.snapshot_rx.try_recv(), Err(TryRecvError::Disconnected));
        assert_eq!(staying.snapshot_rx.try_recv(), Ok(snapshot_at(1)));
        assert_eq!(staying.snapshot_rx.try_recv(), Ok(snapshot_at(5)));
        assert_eq!(broadcaster.subscriber_count(), 1);
    }

    #[test]
    fn test_broadcast_prunes_dropped() {
        // Purpose: Verify that subscribers whose receiver is gone are removed on publish

        // Arrange
        let mut broadcaster = StatusBroadcaster::new();
        let dropped = broadcaster.subscribe(snapshot_at(1));
        let _kept = broadcaster.subscribe(snapshot_at(1));
        drop(dropped);

        // Act
        broadcaster.publish(snapshot_at(2));

        // Assert
        assert_eq!(broadcaster.subscriber_count(), 1);
    }
}
