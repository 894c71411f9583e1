//! Block lifecycle choreography
//!
//! End-to-end begin/end sequencing against mock collaborators: epoch
//! cadence around a boundary, the one-block proposer lag, and rejection of
//! engine contract violations.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{addr, begin_event, harness, run_block, StaticOrderBook};
    use settle_core::{BlockLifecycleApi, EndBlockEvent, EventTag, SettlementError};

    /// Heights 98..=101 with interval 100: the epoch-triggered distribution
    /// and snapshot fire exactly once, at height 100.
    #[tokio::test]
    async fn epoch_fires_exactly_once_at_the_boundary() {
        let h = harness(100, StaticOrderBook::default());

        for height in 98..=101u64 {
            run_block(&h.service, height, addr(height as u8)).await;
        }

        assert_eq!(h.ledger.count_of("distribute"), 1);
        assert_eq!(h.ledger.count_of("snapshot"), 1);

        let calls = h.ledger.calls.lock().clone();
        let d = calls.iter().position(|c| c == "distribute").unwrap();
        let s = calls.iter().position(|c| c == "snapshot").unwrap();
        assert!(d < s, "distribution must precede the snapshot");
    }

    #[tokio::test]
    async fn boundary_block_reports_epoch_tag() {
        let h = harness(100, StaticOrderBook::default());
        for height in 98..=99u64 {
            run_block(&h.service, height, addr(1)).await;
        }

        let tags = h
            .service
            .on_begin_block(begin_event(100, addr(1)))
            .await
            .unwrap();
        assert!(tags.contains(&EventTag::epoch_settled(100)));

        let tags = h
            .service
            .on_end_block(EndBlockEvent { height: 100 })
            .await
            .unwrap();
        assert!(tags.is_empty(), "no matches and no hooks registered");
    }

    #[tokio::test]
    async fn proposer_reward_lags_one_block() {
        let h = harness(1000, StaticOrderBook::default());
        run_block(&h.service, 1, addr(0x11)).await;
        run_block(&h.service, 2, addr(0x22)).await;
        run_block(&h.service, 3, addr(0x33)).await;

        let calls = h.ledger.calls.lock().clone();
        // Height 1 allocates nothing; 2 credits 1's proposer; 3 credits 2's.
        assert_eq!(calls[0], format!("allocate 150/175 {}", addr(0x11)));
        assert_eq!(calls[1], format!("allocate 150/175 {}", addr(0x22)));
    }

    #[tokio::test]
    async fn engine_contract_violations_are_fatal() {
        let h = harness(1000, StaticOrderBook::default());
        run_block(&h.service, 5, addr(1)).await;

        // Duplicate begin for an already finished height.
        let err = h
            .service
            .on_begin_block(begin_event(5, addr(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, SettlementError::Sequencing { .. }));

        // End-block with no begun height.
        let err = h
            .service
            .on_end_block(EndBlockEvent { height: 6 })
            .await
            .unwrap_err();
        assert!(matches!(err, SettlementError::Sequencing { .. }));

        // Begin-begin without an intervening end.
        h.service
            .on_begin_block(begin_event(6, addr(1)))
            .await
            .unwrap();
        let err = h
            .service
            .on_begin_block(begin_event(7, addr(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, SettlementError::Sequencing { .. }));
    }
}
