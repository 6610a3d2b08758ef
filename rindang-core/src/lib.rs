//! Rindang Core - café floor plan, reservations and ordering
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────────┐     ┌──────────────┐
//!                 │ Reservation  │     │    Cart /    │
//!                 │    Flow      │     │   Checkout   │
//!                 └──────┬───────┘     └──────┬───────┘
//!                        │   pick / select    │
//!                        ▼                    ▼
//!                 ┌─────────────────────────────────┐
//!                 │        Floor-Plan Hit-Tester    │
//!                 └──────┬───────────────────┬──────┘
//!                        ▼                   ▼
//!                 ┌──────────────┐   ┌──────────────────┐
//!                 │Table Registry│   │Table Status Store│──► LocalStorage (redb)
//!                 └──────────────┘   └──────────────────┘
//! ```
//!
//! All state transitions are synchronous. Backend calls (via
//! `rindang-client`) only feed the read caches and the status store.

pub mod cache;
pub mod cart;
pub mod checkout;
pub mod clock;
pub mod config;
pub mod error;
pub mod logger;
pub mod reservation;
pub mod session;
pub mod storage;
pub mod tables;
pub mod validation;

pub use cart::{Cart, CartError, CartItem, MenuEntry};
pub use checkout::{CheckoutError, OrderCheckout};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use reservation::{FlowError, FlowState, ReservationFlow, ReservationSummary};
pub use session::{AccessError, Dashboard, Session};
pub use storage::{LocalStorage, MemoryStorage, RedbStorage, StorageError};
pub use tables::{FloorPlan, Pick, PointerPos, TableRegistry, TableStatusStore};
