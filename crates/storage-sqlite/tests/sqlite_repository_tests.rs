//! Repository tests against a migrated SQLite file.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tempfile::TempDir;

use wealthdesk_core::chat::{ChatRepositoryTrait, NewChatMessage};
use wealthdesk_core::clients::{
    AllocationSeed, ClientId, ClientRepositoryTrait, ClientSeed, NewClient, NewPortfolioSeed,
    PerformanceSeed,
};
use wealthdesk_core::glossary::{GlossaryRepositoryTrait, NewGlossaryTerm};
use wealthdesk_core::insights::{InsightPriority, MarketInsightRepositoryTrait, NewMarketInsight};
use wealthdesk_core::portfolios::{
    AssetAllocationUpdate, PortfolioRepositoryTrait, PortfolioUpdate,
};
use wealthdesk_core::transactions::{NewTransaction, TransactionRepositoryTrait};
use wealthdesk_core::errors::{DatabaseError, Error};
use wealthdesk_storage_sqlite::{
    init, open, ChatRepository, ClientRepository, DbPool, GlossaryRepository, MarketInsightRepository,
    PortfolioRepository, TransactionRepository, WriteHandle,
};

struct TestDb {
    _dir: TempDir,
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

fn test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("test.db");
    let (pool, writer) = open(path.to_str().unwrap()).unwrap();
    TestDb {
        _dir: dir,
        pool,
        writer,
    }
}

fn new_client(id: &str) -> NewClient {
    NewClient {
        client_id: ClientId::parse(id).unwrap(),
        name: format!("Client {}", id),
        risk_tolerance: "Moderate".to_string(),
        investment_horizon: 7,
        investment_experience: "Experienced".to_string(),
        free_asset_ratio: dec!(75.5),
        investment_objective: "Growth".to_string(),
    }
}

fn seed(id: &str) -> ClientSeed {
    ClientSeed {
        client: new_client(id),
        portfolio: Some(NewPortfolioSeed {
            total_value: dec!(2500000),
            ytd_return: dec!(8.5),
            volatility: dec!(12.3),
            allocations: vec![
                AllocationSeed {
                    asset_type: "Equities".to_string(),
                    allocation: dec!(60),
                    value: dec!(1500000),
                },
                AllocationSeed {
                    asset_type: "Fixed Income".to_string(),
                    allocation: dec!(40),
                    value: dec!(1000000),
                },
            ],
            performance: (1..=3)
                .map(|month| PerformanceSeed {
                    date: NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
                    value: dec!(2400000) + rust_decimal::Decimal::from(month) * dec!(10000),
                    benchmark_value: if month == 2 { None } else { Some(dec!(2400000)) },
                })
                .collect(),
        }),
    }
}

#[test]
fn unwritable_directory_is_a_connection_failure() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();
    let path = blocker.join("sub").join("test.db");

    let err = init(path.to_str().unwrap()).unwrap_err();
    match err {
        Error::Database(DatabaseError::ConnectionFailed(msg)) => {
            assert!(msg.starts_with("cannot create"), "{}", msg)
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn seeded_client_round_trips() {
    let db = test_db();
    let clients = ClientRepository::new(db.pool.clone(), db.writer.clone());
    let portfolios = PortfolioRepository::new(db.pool.clone(), db.writer.clone());

    let seeded = clients.create_seeded(seed("WM-001")).await.unwrap();
    assert_eq!(seeded.allocations.len(), 2);
    assert_eq!(seeded.performance.len(), 3);

    let id = ClientId::parse("WM-001").unwrap();
    let client = clients.get_by_client_id(&id).unwrap().unwrap();
    assert_eq!(client.free_asset_ratio, dec!(75.5));
    assert!(clients.exists(&id).unwrap());

    let portfolio = portfolios.get_by_client(&id).unwrap().unwrap();
    assert_eq!(portfolio.client_id, id);
    assert_eq!(portfolio.total_value, dec!(2500000));
    assert_eq!(Some(&portfolio), seeded.portfolio.as_ref());

    let allocations = portfolios.list_allocations(portfolio.id).unwrap();
    assert!(allocations.iter().all(|a| a.portfolio_id == portfolio.id));

    let performance = portfolios.list_performance(portfolio.id, 12).unwrap();
    let dates: Vec<u32> = performance.iter().map(|p| chrono::Datelike::month(&p.date)).collect();
    assert_eq!(dates, vec![3, 2, 1]);
    assert_eq!(performance[1].benchmark_value, None);
    assert_eq!(portfolios.list_performance(portfolio.id, 1).unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_rows_are_absent_not_errors() {
    let db = test_db();
    let clients = ClientRepository::new(db.pool.clone(), db.writer.clone());
    let portfolios = PortfolioRepository::new(db.pool.clone(), db.writer.clone());

    let missing = ClientId::parse("NOPE").unwrap();
    assert!(clients.get_by_client_id(&missing).unwrap().is_none());
    assert!(portfolios.get_by_client(&missing).unwrap().is_none());
    assert!(portfolios.get_by_id(999).unwrap().is_none());
    assert!(clients.list().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_client_id_is_a_unique_violation() {
    let db = test_db();
    let clients = ClientRepository::new(db.pool.clone(), db.writer.clone());

    clients.create(new_client("WM-9")).await.unwrap();
    let err = clients.create(new_client("WM-9")).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Database(DatabaseError::UniqueViolation(_))
    ));
}

#[tokio::test]
async fn failed_seed_leaves_nothing_behind() {
    let db = test_db();
    let clients = ClientRepository::new(db.pool.clone(), db.writer.clone());

    clients.create(new_client("WM-1")).await.unwrap();
    assert!(clients.create_seeded(seed("WM-1")).await.is_err());

    let portfolios = PortfolioRepository::new(db.pool.clone(), db.writer.clone());
    let id = ClientId::parse("WM-1").unwrap();
    assert!(portfolios.get_by_client(&id).unwrap().is_none());
    assert_eq!(clients.list().unwrap().len(), 1);
}

#[tokio::test]
async fn portfolio_and_allocation_updates() {
    let db = test_db();
    let clients = ClientRepository::new(db.pool.clone(), db.writer.clone());
    let portfolios = PortfolioRepository::new(db.pool.clone(), db.writer.clone());
    let seeded = clients.create_seeded(seed("WM-2")).await.unwrap();
    let portfolio = seeded.portfolio.unwrap();

    let updated = portfolios
        .update(
            portfolio.id,
            PortfolioUpdate {
                total_value: Some(dec!(2600000)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.total_value, dec!(2600000));
    assert_eq!(updated.volatility, dec!(12.3));
    assert!(updated.last_updated >= portfolio.last_updated);

    let allocation = portfolios
        .update_allocation(
            seeded.allocations[0].id,
            AssetAllocationUpdate {
                allocation: Some(dec!(65)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(allocation.allocation, dec!(65));
    assert_eq!(allocation.asset_type, "Equities");

    let err = portfolios
        .update(
            4242,
            PortfolioUpdate {
                ytd_return: Some(dec!(1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    let err = portfolios
        .update_allocation(
            4242,
            AssetAllocationUpdate {
                value: Some(dec!(1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn chat_history_is_newest_first_and_per_client() {
    let db = test_db();
    let clients = ClientRepository::new(db.pool.clone(), db.writer.clone());
    let chat = ChatRepository::new(db.pool.clone(), db.writer.clone());
    clients.create(new_client("A")).await.unwrap();
    clients.create(new_client("B")).await.unwrap();

    let a = ClientId::parse("A").unwrap();
    let b = ClientId::parse("B").unwrap();
    for i in 0..3 {
        chat.append(NewChatMessage {
            client_id: a.clone(),
            message: format!("question {}", i),
            response: format!("answer {}", i),
        })
        .await
        .unwrap();
    }
    chat.append(NewChatMessage {
        client_id: b.clone(),
        message: "hello".to_string(),
        response: "hi".to_string(),
    })
    .await
    .unwrap();

    let history = chat.list_recent(&a, 2).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].message, "question 2");
    assert!(history.iter().all(|m| m.client_id == a));
    assert_eq!(chat.list_recent(&b, 50).unwrap().len(), 1);

    let err = chat
        .append(NewChatMessage {
            client_id: ClientId::parse("ghost").unwrap(),
            message: "anyone?".to_string(),
            response: String::new(),
        })
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_all_clears_client_data() {
    let db = test_db();
    let clients = ClientRepository::new(db.pool.clone(), db.writer.clone());
    let chat = ChatRepository::new(db.pool.clone(), db.writer.clone());
    clients.create_seeded(seed("WM-1")).await.unwrap();
    clients.create_seeded(seed("WM-2")).await.unwrap();
    chat.append(NewChatMessage {
        client_id: ClientId::parse("WM-1").unwrap(),
        message: "q".to_string(),
        response: "a".to_string(),
    })
    .await
    .unwrap();

    assert_eq!(clients.delete_all().await.unwrap(), 2);
    assert!(clients.list().unwrap().is_empty());

    // ids can be reused after a reseed
    clients.create_seeded(seed("WM-1")).await.unwrap();
}

#[tokio::test]
async fn insights_and_glossary() {
    let db = test_db();
    let insights = MarketInsightRepository::new(db.pool.clone(), db.writer.clone());
    let glossary = GlossaryRepository::new(db.pool.clone(), db.writer.clone());

    for i in 0..3 {
        insights
            .create(NewMarketInsight {
                title: format!("Insight {}", i),
                content: "Body".to_string(),
                category: "CIO Update".to_string(),
                priority: InsightPriority::High,
            })
            .await
            .unwrap();
    }
    let listed = insights.list(2).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].title, "Insight 2");
    assert_eq!(listed[0].priority, InsightPriority::High);

    glossary
        .create(NewGlossaryTerm {
            term: "Sharpe Ratio".to_string(),
            definition: "Risk-adjusted return".to_string(),
            category: "Performance".to_string(),
            language: "en".to_string(),
        })
        .await
        .unwrap();
    assert!(glossary.get("sharpe ratio", "en").unwrap().is_some());
    assert!(glossary.get("Sharpe Ratio", "de").unwrap().is_none());
    assert_eq!(glossary.list("en").unwrap().len(), 1);

    let duplicate = glossary
        .create(NewGlossaryTerm {
            term: "Sharpe Ratio".to_string(),
            definition: "Again".to_string(),
            category: "Performance".to_string(),
            language: "en".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        duplicate,
        Error::Database(DatabaseError::UniqueViolation(_))
    ));
}

#[tokio::test]
async fn transactions_are_listed_by_date_descending() {
    let db = test_db();
    let transactions = TransactionRepository::new(db.pool.clone(), db.writer.clone());

    let rows = ["2024-01-05", "2024-03-01", "2024-02-10"]
        .iter()
        .map(|date| NewTransaction {
            client_id: "WM-001".to_string(),
            transaction_date: date.to_string(),
            quantity: Some(dec!(10.5)),
            side: Some("Buy".to_string()),
            ..Default::default()
        })
        .collect();
    assert_eq!(transactions.insert_batch(rows).await.unwrap(), 3);

    let id = ClientId::parse("WM-001").unwrap();
    let listed = transactions.list_by_client(&id, 50).unwrap();
    let dates: Vec<&str> = listed.iter().map(|t| t.transaction_date.as_str()).collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-02-10", "2024-01-05"]);
    assert_eq!(listed[0].quantity, Some(dec!(10.5)));
    assert_eq!(listed[0].isin, None);
    assert!(transactions
        .list_by_client(&ClientId::parse("OTHER").unwrap(), 50)
        .unwrap()
        .is_empty());
}
