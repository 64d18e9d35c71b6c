use {
    super::{
        create_auction::CreateAuctionInput,
        get_stop_list::GetStopListInput,
        set_auction_winner::SetAuctionWinnerInput,
        start_auction::StartAuctionInput,
        stop_auction::StopAuctionInput,
        tests::{
            guarded,
            last_write_wins,
            stored_auction,
        },
        Config,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities::{
            self,
            AuctionState,
        },
        bid::{
            entities::BidCreate,
            service::{
                add_bid::AddBidInput,
                get_bids::GetBidsInput,
                Service as BidService,
            },
        },
        kernel::{
            db::Deadlines,
            test_utils::InMemoryDb,
        },
        server_metrics::recorder_builder,
    },
    axum_prometheus::metrics,
    std::time::Duration as StdDuration,
    time::{
        macros::datetime,
        Duration,
        OffsetDateTime,
    },
};

fn services(db: &InMemoryDb, config: Config) -> (Service, BidService) {
    let bid_service = BidService::new(db.clone(), Deadlines::default());
    let auction_service = Service::new(
        db.clone(),
        Deadlines::default(),
        config,
        bid_service.clone(),
    );
    (auction_service, bid_service)
}

fn new_auction(id: &str) -> entities::Auction {
    entities::Auction {
        id:          id.to_string(),
        order_id:    "O1".to_string(),
        start_date:  None,
        end_date:    None,
        winning_bid: None,
        subscribed:  false,
        cloned:      false,
    }
}

fn bid(id: &str, auction_id: &str) -> BidCreate {
    BidCreate {
        id:            id.to_string(),
        auction_id:    auction_id.to_string(),
        price:         "100".to_string(),
        quantity:      1,
        delivery_date: None,
        submitter:     "bidder.onion".to_string(),
        response_date: None,
    }
}

fn ids(auctions: &[entities::Auction]) -> Vec<&str> {
    auctions.iter().map(|auction| auction.id.as_str()).collect()
}

async fn stop_list(service: &Service, seconds: i64) -> Vec<entities::Auction> {
    service
        .get_stop_list(GetStopListInput {
            duration: seconds.to_string(),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_full_lifecycle() {
    let db = InMemoryDb::default();
    let (service, bid_service) = services(&db, guarded());

    service
        .create_auction(CreateAuctionInput {
            auction: new_auction("A1"),
        })
        .await
        .unwrap();
    assert_eq!(ids(&service.get_start_list().await.unwrap()), vec!["A1"]);

    let started_at = OffsetDateTime::now_utc();
    service
        .start_auction(StartAuctionInput {
            auction_id: "A1".to_string(),
            start_time: started_at,
        })
        .await
        .unwrap();
    assert!(service.get_start_list().await.unwrap().is_empty());
    assert!(stop_list(&service, 60).await.is_empty());

    service
        .stop_auction(StopAuctionInput {
            auction_id: "A1".to_string(),
            end_time:   started_at + Duration::seconds(120),
        })
        .await
        .unwrap();
    assert_eq!(
        ids(&service.get_awaiting_winner_list().await.unwrap()),
        vec!["A1"]
    );

    for bid_id in ["B1", "B2"] {
        bid_service
            .add_bid(AddBidInput {
                bid_create: bid(bid_id, "A1"),
            })
            .await
            .unwrap();
    }
    let bids = bid_service
        .get_bids(GetBidsInput {
            auction_id: "A1".to_string(),
        })
        .await
        .unwrap();
    let mut bid_ids: Vec<_> = bids.iter().map(|bid| bid.id.as_str()).collect();
    bid_ids.sort();
    assert_eq!(bid_ids, vec!["B1", "B2"]);

    service
        .set_auction_winner(SetAuctionWinnerInput {
            auction_id: "A1".to_string(),
            bid_id:     "B1".to_string(),
        })
        .await
        .unwrap();
    let stored = db.auction("A1").unwrap();
    assert_eq!(stored.winning_bid.as_deref(), Some("B1"));
    assert_eq!(stored.state(), AuctionState::Won);
    assert!(service.get_awaiting_winner_list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_stop_list_respects_open_duration() {
    let db = InMemoryDb::default();
    let (service, _) = services(&db, guarded());
    let now = OffsetDateTime::now_utc();
    db.insert_auction(stored_auction("fresh", Some(now), None, None));
    db.insert_auction(stored_auction(
        "old",
        Some(now - Duration::seconds(61)),
        None,
        None,
    ));
    db.insert_auction(stored_auction(
        "stopped",
        Some(now - Duration::hours(2)),
        Some(now - Duration::hours(1)),
        None,
    ));
    db.insert_auction(stored_auction("unstarted", None, None, None));

    assert_eq!(ids(&stop_list(&service, 60).await), vec!["old"]);
    assert!(stop_list(&service, 3600).await.is_empty());
}

#[tokio::test]
async fn test_stop_list_can_include_unstarted() {
    let db = InMemoryDb::default();
    let config = Config {
        stop_list_includes_unstarted: true,
        ..guarded()
    };
    let (service, _) = services(&db, config);
    db.insert_auction(stored_auction("unstarted", None, None, None));
    db.insert_auction(stored_auction(
        "won",
        None,
        Some(OffsetDateTime::now_utc()),
        Some("b1"),
    ));

    assert_eq!(ids(&stop_list(&service, 60).await), vec!["unstarted"]);
}

#[tokio::test]
async fn test_lists_follow_dates_regardless_of_other_fields() {
    let db = InMemoryDb::default();
    let (service, _) = services(&db, guarded());
    let now = OffsetDateTime::now_utc();
    db.insert_auction(stored_auction("unstarted", None, None, None));
    // Legacy records that skipped steps.
    db.insert_auction(stored_auction("ended-unstarted", None, Some(now), None));
    db.insert_auction(stored_auction("won-unstarted", None, Some(now), Some("b1")));
    db.insert_auction(stored_auction("started", Some(now), None, None));
    db.insert_auction(stored_auction("stopped", Some(now), Some(now), None));
    db.insert_auction(stored_auction("won", Some(now), Some(now), Some("b2")));

    assert_eq!(
        ids(&service.get_start_list().await.unwrap()),
        vec!["unstarted", "ended-unstarted", "won-unstarted"]
    );
    assert_eq!(
        ids(&service.get_awaiting_winner_list().await.unwrap()),
        vec!["ended-unstarted", "stopped"]
    );
}

#[tokio::test]
async fn test_concurrent_starts_last_write_wins() {
    let db = InMemoryDb::default();
    let (service, _) = services(&db, last_write_wins());
    db.insert_auction(stored_auction("A1", None, None, None));
    let first = datetime!(2024-05-01 12:00 UTC);
    let second = datetime!(2024-05-01 12:05 UTC);

    let (a, b) = tokio::join!(
        service.start_auction(StartAuctionInput {
            auction_id: "A1".to_string(),
            start_time: first,
        }),
        service.start_auction(StartAuctionInput {
            auction_id: "A1".to_string(),
            start_time: second,
        }),
    );

    // Both callers succeed and one write silently replaces the other.
    assert!(a.is_ok());
    assert!(b.is_ok());
    let start_date = db.auction("A1").unwrap().start_date;
    assert!(start_date == Some(first) || start_date == Some(second));
}

#[tokio::test]
async fn test_concurrent_starts_guarded() {
    let db = InMemoryDb::default();
    let (service, _) = services(&db, guarded());
    db.insert_auction(stored_auction("A1", None, None, None));
    let first = datetime!(2024-05-01 12:00 UTC);
    let second = datetime!(2024-05-01 12:05 UTC);

    let (a, b) = tokio::join!(
        service.start_auction(StartAuctionInput {
            auction_id: "A1".to_string(),
            start_time: first,
        }),
        service.start_auction(StartAuctionInput {
            auction_id: "A1".to_string(),
            start_time: second,
        }),
    );

    let (winner, loser) = match (a, b) {
        (Ok(winner), Err(loser)) | (Err(loser), Ok(winner)) => (winner, loser),
        (a, b) => panic!("expected exactly one start to succeed: {:?} {:?}", a, b),
    };
    assert!(matches!(loser, RestError::Conflict(_)));
    assert_eq!(db.auction("A1").unwrap().start_date, winner.start_date);
}

#[tokio::test]
async fn test_repeated_transitions() {
    let start_time = datetime!(2024-05-01 12:00 UTC);
    let restart = datetime!(2024-05-01 12:30 UTC);

    let db = InMemoryDb::default();
    let (service, _) = services(&db, guarded());
    db.insert_auction(stored_auction("A1", Some(start_time), None, None));
    let result = service
        .start_auction(StartAuctionInput {
            auction_id: "A1".to_string(),
            start_time: restart,
        })
        .await;
    assert!(matches!(result, Err(RestError::Conflict(_))));
    assert_eq!(db.auction("A1").unwrap().start_date, Some(start_time));

    let db = InMemoryDb::default();
    let (service, _) = services(&db, last_write_wins());
    db.insert_auction(stored_auction("A1", Some(start_time), None, None));
    service
        .start_auction(StartAuctionInput {
            auction_id: "A1".to_string(),
            start_time: restart,
        })
        .await
        .unwrap();
    assert_eq!(db.auction("A1").unwrap().start_date, Some(restart));
}

#[tokio::test]
async fn test_padded_id_can_be_started() {
    let db = InMemoryDb::default();
    let (service, _) = services(&db, guarded());
    service
        .create_auction(CreateAuctionInput {
            auction: new_auction(" A1 "),
        })
        .await
        .unwrap();

    service
        .start_auction(StartAuctionInput {
            auction_id: "A1".to_string(),
            start_time: datetime!(2024-05-01 12:00 UTC),
        })
        .await
        .unwrap();
    assert_eq!(db.auction("A1").unwrap().state(), AuctionState::Started);
}

#[tokio::test]
async fn test_transitions_are_counted() {
    let recorder = recorder_builder().unwrap().build_recorder();
    let handle = recorder.handle();
    let _recorder = metrics::set_default_local_recorder(&recorder);

    let db = InMemoryDb::default();
    let (service, _) = services(&db, guarded());
    db.insert_auction(stored_auction("A1", None, None, None));
    for start_time in [
        datetime!(2024-05-01 12:00 UTC),
        datetime!(2024-05-01 12:05 UTC),
    ] {
        let _ = service
            .start_auction(StartAuctionInput {
                auction_id: "A1".to_string(),
                start_time,
            })
            .await;
    }
    service
        .stop_auction(StopAuctionInput {
            auction_id: "A1".to_string(),
            end_time:   datetime!(2024-05-01 13:00 UTC),
        })
        .await
        .unwrap();

    let rendered = handle.render();
    assert!(rendered.contains(r#"auction_transitions_total{transition="start"} 1"#));
    assert!(rendered.contains(r#"auction_transitions_total{transition="stop"} 1"#));
    assert!(!rendered.contains(r#"transition="winner""#));
}

#[tokio::test]
async fn test_create_auction_twice_is_conflict() {
    let db = InMemoryDb::default();
    let (service, _) = services(&db, guarded());
    service
        .create_auction(CreateAuctionInput {
            auction: new_auction("A1"),
        })
        .await
        .unwrap();

    let result = service
        .create_auction(CreateAuctionInput {
            auction: new_auction("A1"),
        })
        .await;
    assert!(matches!(result, Err(RestError::Conflict(_))));
    assert_eq!(db.auction("A1").unwrap(), new_auction("A1"));
}

#[tokio::test(start_paused = true)]
async fn test_slow_storage_hits_deadlines() {
    let db = InMemoryDb::with_latency(StdDuration::from_secs(6));
    let (service, _) = services(&db, guarded());

    // Six seconds is past the read deadline but within the write deadline.
    service
        .create_auction(CreateAuctionInput {
            auction: new_auction("A1"),
        })
        .await
        .unwrap();
    assert_eq!(
        service.get_start_list().await.unwrap_err(),
        RestError::DeadlineExceeded
    );
}
