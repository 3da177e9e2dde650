pub mod catalog;
pub mod prompt;
pub mod providers;
pub mod reasoning;
pub mod rules;
pub mod stylist;

pub use catalog::ProductCatalog;
pub use reasoning::ReasoningGateway;
pub use rules::RuleEngine;
pub use stylist::HybridStylist;
