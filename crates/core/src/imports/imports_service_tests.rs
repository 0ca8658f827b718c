#[cfg(test)]
mod tests {
    use crate::clients::{Client, ClientId, ClientSeed, ClientServiceTrait, NewClient, SeededClient};
    use crate::errors::{Error, Result};
    use crate::glossary::{GlossaryServiceTrait, GlossaryTerm, NewGlossaryTerm};
    use crate::imports::{read_sheet, ImportService, SeedPlan, SourceFormat};
    use crate::insights::{MarketInsight, MarketInsightServiceTrait, NewMarketInsight};
    use crate::transactions::{NewTransaction, Transaction, TransactionServiceTrait};
    use crate::utils::time_utils::now_naive;
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::{Arc, Mutex};

    // --- Mock ClientService ---
    #[derive(Default)]
    struct MockClientService {
        clients: Mutex<Vec<Client>>,
        seeds: Mutex<Vec<ClientSeed>>,
    }

    #[async_trait]
    impl ClientServiceTrait for MockClientService {
        fn get_client(&self, client_id: &ClientId) -> Result<Option<Client>> {
            let clients = self.clients.lock().unwrap();
            Ok(clients.iter().find(|c| &c.client_id == client_id).cloned())
        }

        fn list_clients(&self) -> Result<Vec<Client>> {
            Ok(self.clients.lock().unwrap().clone())
        }

        async fn create_client(&self, _new_client: NewClient) -> Result<Client> {
            unimplemented!()
        }

        async fn create_seeded_client(&self, seed: ClientSeed) -> Result<SeededClient> {
            let mut clients = self.clients.lock().unwrap();
            if clients.iter().any(|c| c.client_id == seed.client.client_id) {
                return Err(Error::ConstraintViolation(format!(
                    "Client {} already exists",
                    seed.client.client_id
                )));
            }
            let now = now_naive();
            let client = Client {
                client_id: seed.client.client_id.clone(),
                name: seed.client.name.clone(),
                risk_tolerance: seed.client.risk_tolerance.clone(),
                investment_horizon: seed.client.investment_horizon,
                investment_experience: seed.client.investment_experience.clone(),
                free_asset_ratio: seed.client.free_asset_ratio,
                investment_objective: seed.client.investment_objective.clone(),
                created_at: now,
                updated_at: now,
            };
            clients.push(client.clone());
            self.seeds.lock().unwrap().push(seed);
            Ok(SeededClient {
                client,
                portfolio: None,
                allocations: Vec::new(),
                performance: Vec::new(),
            })
        }

        async fn reset_client_data(&self) -> Result<usize> {
            let mut clients = self.clients.lock().unwrap();
            let removed = clients.len();
            clients.clear();
            Ok(removed)
        }
    }

    // --- Mock TransactionService ---
    #[derive(Default)]
    struct MockTransactionService {
        imported: Mutex<Vec<NewTransaction>>,
    }

    #[async_trait]
    impl TransactionServiceTrait for MockTransactionService {
        fn get_client_transactions(
            &self,
            _client_id: &ClientId,
            _limit: Option<i64>,
        ) -> Result<Vec<Transaction>> {
            Ok(Vec::new())
        }

        async fn import_transactions(&self, transactions: Vec<NewTransaction>) -> Result<usize> {
            let count = transactions.len();
            self.imported.lock().unwrap().extend(transactions);
            Ok(count)
        }
    }

    // --- Mock MarketInsightService ---
    #[derive(Default)]
    struct MockInsightService {
        insights: Mutex<Vec<MarketInsight>>,
    }

    #[async_trait]
    impl MarketInsightServiceTrait for MockInsightService {
        fn list_insights(&self, limit: Option<i64>) -> Result<Vec<MarketInsight>> {
            let insights = self.insights.lock().unwrap();
            let limit = limit.unwrap_or(10) as usize;
            Ok(insights.iter().take(limit).cloned().collect())
        }

        async fn create_insight(&self, insight: NewMarketInsight) -> Result<MarketInsight> {
            let mut insights = self.insights.lock().unwrap();
            let created = MarketInsight {
                id: insights.len() as i32 + 1,
                title: insight.title,
                content: insight.content,
                category: insight.category,
                priority: insight.priority,
                created_at: now_naive(),
            };
            insights.push(created.clone());
            Ok(created)
        }
    }

    // --- Mock GlossaryService ---
    #[derive(Default)]
    struct MockGlossaryService {
        terms: Mutex<Vec<GlossaryTerm>>,
    }

    #[async_trait]
    impl GlossaryServiceTrait for MockGlossaryService {
        fn list_terms(&self, _language: Option<&str>) -> Result<Vec<GlossaryTerm>> {
            Ok(self.terms.lock().unwrap().clone())
        }

        fn get_term(&self, term: &str, _language: Option<&str>) -> Result<Option<GlossaryTerm>> {
            let terms = self.terms.lock().unwrap();
            Ok(terms.iter().find(|t| t.term == term).cloned())
        }

        async fn create_term(&self, term: NewGlossaryTerm) -> Result<GlossaryTerm> {
            let mut terms = self.terms.lock().unwrap();
            if terms.iter().any(|t| t.term == term.term) {
                return Err(Error::ConstraintViolation(term.term));
            }
            let created = GlossaryTerm {
                id: terms.len() as i32 + 1,
                term: term.term,
                definition: term.definition,
                category: term.category,
                language: term.language,
            };
            terms.push(created.clone());
            Ok(created)
        }
    }

    struct Fixture {
        clients: Arc<MockClientService>,
        transactions: Arc<MockTransactionService>,
        insights: Arc<MockInsightService>,
        glossary: Arc<MockGlossaryService>,
        service: ImportService,
    }

    fn fixture() -> Fixture {
        let clients = Arc::new(MockClientService::default());
        let transactions = Arc::new(MockTransactionService::default());
        let insights = Arc::new(MockInsightService::default());
        let glossary = Arc::new(MockGlossaryService::default());
        let service = ImportService::new(
            clients.clone(),
            transactions.clone(),
            insights.clone(),
            glossary.clone(),
        );
        Fixture {
            clients,
            transactions,
            insights,
            glossary,
            service,
        }
    }

    const CLIENT_SHEET: &str = "\
Client ID,Name,Risk Tolerance,Investment Horizon
WM-101,Ada Lovelace,Conservative,4
WM-102,Grace Hopper,Aggressive,12
WM-103,Alan Turing,Moderate,
";

    #[tokio::test]
    async fn client_sheet_creates_one_bundle_per_row() {
        let f = fixture();
        let table = read_sheet(CLIENT_SHEET.as_bytes(), Some("clients.csv")).unwrap();

        let summary = f
            .service
            .import_clients(SourceFormat::ClientSheet, &table, false)
            .await
            .unwrap();

        assert_eq!(summary.imported, 3);
        assert_eq!(summary.skipped, 0);
        assert_eq!(f.clients.list_clients().unwrap().len(), 3);

        let seeds = f.clients.seeds.lock().unwrap();
        for seed in seeds.iter() {
            let portfolio = seed.portfolio.as_ref().unwrap();
            assert!(!portfolio.allocations.is_empty());
            assert_eq!(portfolio.performance.len(), 12);
        }
        assert_eq!(seeds[2].client.investment_horizon, 5);
    }

    #[tokio::test]
    async fn bad_rows_are_skipped_and_reported() {
        let f = fixture();
        let sheet = "\
Client ID,Name,Risk Tolerance,Free Asset Ratio
WM-1,Ada,Low,80
WM-2,,High,70
WM-1,Copy of Ada,Low,80
WM-3,Grace,High,plenty
WM-4,Alan,Medium,60
";
        let table = read_sheet(sheet.as_bytes(), None).unwrap();
        let summary = f
            .service
            .import_clients(SourceFormat::ClientSheet, &table, false)
            .await
            .unwrap();

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 3);
        let lines: Vec<usize> = summary.failures.iter().map(|x| x.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert_eq!(summary.failures[1].client_id.as_deref(), Some("WM-1"));
    }

    #[tokio::test]
    async fn oversized_figures_skip_the_row_and_keep_going() {
        let f = fixture();
        let sheet = "\
Client ID,Name,Risk Tolerance,Portfolio Value,YTD Return
WM-1,Ada,Low,1e28,4
WM-2,Grace,High,2500000,1e27
WM-3,Alan,Medium,1800000,6.5
";
        let table = read_sheet(sheet.as_bytes(), Some("clients.csv")).unwrap();
        let summary = f
            .service
            .import_clients(SourceFormat::ClientSheet, &table, false)
            .await
            .unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 2);
        let lines: Vec<usize> = summary.failures.iter().map(|x| x.line).collect();
        assert_eq!(lines, vec![2, 3]);
        assert_eq!(summary.clients[0].client_id.as_str(), "WM-3");
    }

    #[tokio::test]
    async fn existing_clients_are_skipped() {
        let f = fixture();
        let table = read_sheet(CLIENT_SHEET.as_bytes(), None).unwrap();
        f.service
            .import_clients(SourceFormat::ClientSheet, &table, false)
            .await
            .unwrap();

        let again = f
            .service
            .import_clients(SourceFormat::ClientSheet, &table, false)
            .await
            .unwrap();
        assert_eq!(again.imported, 0);
        assert_eq!(again.skipped, 3);
        assert_eq!(f.clients.list_clients().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn header_mismatch_fails_before_any_write() {
        let f = fixture();
        let table = read_sheet(CLIENT_SHEET.as_bytes(), None).unwrap();
        f.service
            .import_clients(SourceFormat::ClientSheet, &table, false)
            .await
            .unwrap();

        let wrong = read_sheet(b"Name,Favourite Colour\nAda,Blue\n", None).unwrap();
        let err = f
            .service
            .import_clients(SourceFormat::ClientSheet, &wrong, true)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Import(_)));
        let message = err.to_string();
        assert!(message.contains("Client ID"));
        assert!(message.contains("Risk Tolerance"));
        assert!(message.contains("Favourite Colour"));
        // reseed was requested but the header never passed
        assert_eq!(f.clients.list_clients().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn persona_reseed_replaces_clients() {
        let f = fixture();
        let table = read_sheet(CLIENT_SHEET.as_bytes(), None).unwrap();
        f.service
            .import_clients(SourceFormat::ClientSheet, &table, false)
            .await
            .unwrap();

        let personas = "\
Persona,Masked Client ID,Risk Tolerance,Portfolio CCY,Portfolio Volatility,SAA Portfolio Volatility,Number of Positions
Reactive Investor,MC-0001,F,USD,0.15,0.12,10
Established Investor,MC-0002,B,EUR,0.06,0.05,8
";
        let table = read_sheet(personas.as_bytes(), None).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let plan = SeedPlan::build(SourceFormat::PersonaPortfolios, &table, &mut rng).unwrap();
        let summary = f.service.apply_seed_plan(plan, true).await.unwrap();

        assert_eq!(summary.imported, 2);
        let ids: Vec<String> = f
            .clients
            .list_clients()
            .unwrap()
            .into_iter()
            .map(|c| c.client_id.to_string())
            .collect();
        assert_eq!(ids, vec!["MC-0001", "MC-0002"]);
    }

    #[tokio::test]
    async fn transactions_keep_good_rows() {
        let f = fixture();
        let sheet = "\
Transaction Date,Client ID,Side,Quantity,Booking Centre
2024-02-01,WM-001,Buy,100,Zurich
2024-02-02,,Sell,50,Zurich
03/04/2024,WM-002,Sell,n/a,Geneva
05.04.2024,WM-002,Buy,\"1,500\",Geneva
";
        let table = read_sheet(sheet.as_bytes(), None).unwrap();
        let summary = f.service.import_transactions(&table).await.unwrap();

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 2);
        let imported = f.transactions.imported.lock().unwrap();
        assert_eq!(imported[1].transaction_date, "2024-04-05");
    }

    #[tokio::test]
    async fn reference_data_is_idempotent() {
        let f = fixture();
        let first = f.service.seed_reference_data().await.unwrap();
        assert_eq!(first.market_insights, 4);
        assert_eq!(first.glossary_terms, 7);

        let second = f.service.seed_reference_data().await.unwrap();
        assert_eq!(second.market_insights, 0);
        assert_eq!(second.glossary_terms, 0);
        assert_eq!(f.insights.list_insights(Some(100)).unwrap().len(), 4);
        assert_eq!(f.glossary.list_terms(None).unwrap().len(), 7);
    }

    #[tokio::test]
    async fn demo_clients_are_created_once() {
        let f = fixture();
        assert_eq!(f.service.seed_demo_clients().await.unwrap().imported, 3);
        let again = f.service.seed_demo_clients().await.unwrap();
        assert_eq!(again.imported, 0);
        assert_eq!(again.skipped, 3);
    }
}
