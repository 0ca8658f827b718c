//! Clients module - domain models, services, and traits.

mod client_id;
mod clients_model;
mod clients_service;
mod clients_traits;


pub use client_id::ClientId;
pub use clients_model::{
    normalize_experience, normalize_risk_tolerance, AllocationSeed, Client, ClientSeed, NewClient,
    NewPortfolioSeed, PerformanceSeed, SeededClient,
};
pub use clients_service::ClientService;
pub use clients_traits::{ClientRepositoryTrait, ClientServiceTrait};
