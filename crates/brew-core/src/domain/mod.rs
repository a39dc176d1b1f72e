//! Domain entities - client-held mirrors of server state and the rules
//! the client applies to them.

mod case;
mod catalog;
mod leaderboard;
mod order;
mod page;
mod submission;
mod user;

pub use case::{
    ActiveCaseView, COFFEES_PER_CASE, Case, CaseDraft, Coffee, EnabledQuestions, PublicCase,
    PublicCoffee, ScoringInfo,
};
pub use catalog::{Catalog, CatalogDraft, CatalogItem, CatalogOption, Category};
pub use leaderboard::{HistoryEntry, LeaderboardEntry, ProfileStats, percent};
pub use order::{Order, OrderDraft, OrderStatus};
pub use page::{Access, Page};
pub use submission::{CoffeeAnswer, CoffeeGuess, Submission, SubmissionForm, SubmissionResult};
pub use user::UserSummary;
