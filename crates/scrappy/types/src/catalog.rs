//! Catalog reference data: ideas, their assumptions, and the experiment menu.
//!
//! Catalogs are supplied externally (usually as JSON) and are read-only for
//! the rest of the engine. Hidden risk lives here and is never surfaced to a
//! learner-facing view; see [`Assumption::public_view`].

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::ids::{AssumptionId, ExperimentId, IdeaId};

/// Broad risk family an assumption belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Desirability,
    Feasibility,
    Viability,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 3] = [
        RiskCategory::Desirability,
        RiskCategory::Feasibility,
        RiskCategory::Viability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Desirability => "Desirability",
            RiskCategory::Feasibility => "Feasibility",
            RiskCategory::Viability => "Viability",
        }
    }

    /// Tag form used when matching against experiment affinities.
    pub fn tag(&self) -> &'static str {
        match self {
            RiskCategory::Desirability => "desirability",
            RiskCategory::Feasibility => "feasibility",
            RiskCategory::Viability => "viability",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discrete hidden risk level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Ground truth for an assumption: a level or a continuous 0..=1 truth value
/// (higher = riskier).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenRisk {
    Level(RiskLevel),
    Truth(f64),
}

impl HiddenRisk {
    /// Position on a common 0..=1 severity axis, used for ranking by risk.
    pub fn severity(&self) -> f64 {
        match self {
            HiddenRisk::Level(RiskLevel::Low) => 0.25,
            HiddenRisk::Level(RiskLevel::Medium) => 0.5,
            HiddenRisk::Level(RiskLevel::High) => 0.75,
            HiddenRisk::Truth(t) => t.clamp(0.0, 1.0),
        }
    }
}

/// A hypothesis the learner may choose to test.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assumption {
    pub id: AssumptionId,
    pub text: String,
    pub category: RiskCategory,
    /// Theme tags (e.g. `wtp`, `install_time`).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Never shown to the learner.
    pub hidden_risk: HiddenRisk,
}

impl Assumption {
    /// The type/tag set the fit evaluator matches against: theme tags plus
    /// the category tag.
    pub fn type_tags(&self) -> BTreeSet<&str> {
        let mut set: BTreeSet<&str> = self.tags.iter().map(String::as_str).collect();
        set.insert(self.category.tag());
        set
    }

    /// Learner-facing projection with the hidden risk removed.
    pub fn public_view(&self) -> PublicAssumption {
        PublicAssumption {
            id: self.id.clone(),
            text: self.text.clone(),
            category: self.category,
            tags: self.tags.clone(),
        }
    }
}

/// An assumption as a presentation layer may show it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAssumption {
    pub id: AssumptionId,
    pub text: String,
    pub category: RiskCategory,
    pub tags: Vec<String>,
}

/// Outcome-shape selector for quantitative snippets.
///
/// Closed set: every variant has exactly one generator in `scrappy-outcome`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantShape {
    /// Visits → click-through → sign-up funnel.
    Funnel,
    /// Leads → confirmed payments.
    Conversion,
    /// k of n participants pass / report the effect.
    PassRate,
    /// Percentage-point lift of one variant over another.
    Lift,
    /// Improved days out of a tracked window.
    UsageLog,
    /// Timed task with defect count.
    TimeTrial,
    /// Qualitative expert read.
    ExpertQuote,
}

impl QuantShape {
    pub const ALL: [QuantShape; 7] = [
        QuantShape::Funnel,
        QuantShape::Conversion,
        QuantShape::PassRate,
        QuantShape::Lift,
        QuantShape::UsageLog,
        QuantShape::TimeTrial,
        QuantShape::ExpertQuote,
    ];
}

/// A scrappy validation experiment on the menu.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: ExperimentId,
    pub name: String,
    /// Token cost; always positive.
    pub cost: u32,
    /// Nominal duration, reporting only.
    #[serde(default)]
    pub duration_days: u32,
    /// Types/themes this experiment is good at de-risking.
    #[serde(default)]
    pub affinity_tags: Vec<String>,
    pub quant: QuantShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One idea card with its assumptions and materialized experiment menu.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub id: IdeaId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assumptions: Vec<Assumption>,
    pub experiments: Vec<Experiment>,
}

impl Idea {
    pub fn assumption(&self, id: &AssumptionId) -> Result<&Assumption, CatalogError> {
        self.assumptions
            .iter()
            .find(|a| &a.id == id)
            .ok_or_else(|| CatalogError::UnknownAssumption(id.clone()))
    }

    pub fn experiment(&self, id: &ExperimentId) -> Result<&Experiment, CatalogError> {
        self.experiments
            .iter()
            .find(|e| &e.id == id)
            .ok_or_else(|| CatalogError::UnknownExperiment(id.clone()))
    }

    pub fn assumption_ids(&self) -> Vec<AssumptionId> {
        self.assumptions.iter().map(|a| a.id.clone()).collect()
    }

    /// Risk categories that occur among this idea's assumptions.
    pub fn categories_present(&self) -> BTreeSet<RiskCategory> {
        self.assumptions.iter().map(|a| a.category).collect()
    }

    /// Check structural invariants of a single idea.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.assumptions.is_empty() {
            return Err(CatalogError::InvalidCatalog(format!(
                "idea {} has no assumptions",
                self.id
            )));
        }
        if self.experiments.is_empty() {
            return Err(CatalogError::InvalidCatalog(format!(
                "idea {} has no experiments",
                self.id
            )));
        }

        let mut seen = HashSet::new();
        for a in &self.assumptions {
            if !seen.insert(a.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "assumption",
                    id: a.id.to_string(),
                });
            }
            if let HiddenRisk::Truth(t) = a.hidden_risk {
                if !(0.0..=1.0).contains(&t) {
                    return Err(CatalogError::InvalidCatalog(format!(
                        "assumption {} truth {} outside 0..=1",
                        a.id, t
                    )));
                }
            }
        }

        let mut seen = HashSet::new();
        for e in &self.experiments {
            if !seen.insert(e.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "experiment",
                    id: e.id.to_string(),
                });
            }
            if e.cost == 0 {
                return Err(CatalogError::InvalidCatalog(format!(
                    "experiment {} must cost at least one token",
                    e.id
                )));
            }
        }
        Ok(())
    }
}

/// A validated set of ideas.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Catalog {
    ideas: Vec<Idea>,
}

/// Wire form: ideas may omit `experiments` and inherit the shared menu.
#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default)]
    experiments: Vec<Experiment>,
    ideas: Vec<RawIdea>,
}

#[derive(Deserialize)]
struct RawIdea {
    id: IdeaId,
    title: String,
    #[serde(default)]
    description: String,
    assumptions: Vec<Assumption>,
    #[serde(default)]
    experiments: Option<Vec<Experiment>>,
}

impl Catalog {
    /// Build a catalog from already-materialized ideas.
    pub fn new(ideas: Vec<Idea>) -> Result<Self, CatalogError> {
        if ideas.is_empty() {
            return Err(CatalogError::InvalidCatalog("catalog has no ideas".into()));
        }
        let mut seen = HashSet::new();
        for idea in &ideas {
            if !seen.insert(idea.id.0.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "idea",
                    id: idea.id.to_string(),
                });
            }
            idea.validate()?;
        }
        Ok(Self { ideas })
    }

    /// Parse and validate a JSON catalog.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        let ideas = raw
            .ideas
            .into_iter()
            .map(|idea| Idea {
                id: idea.id,
                title: idea.title,
                description: idea.description,
                assumptions: idea.assumptions,
                experiments: idea.experiments.unwrap_or_else(|| raw.experiments.clone()),
            })
            .collect();
        Self::new(ideas)
    }

    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn idea(&self, id: &IdeaId) -> Result<&Idea, CatalogError> {
        self.ideas
            .iter()
            .find(|i| &i.id == id)
            .ok_or_else(|| CatalogError::UnknownIdea(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "experiments": [
            {"id": "landing", "name": "Landing Page Test", "cost": 2, "duration_days": 7,
             "affinity_tags": ["demand", "wtp"], "quant": "funnel"},
            {"id": "expert", "name": "Expert Interview", "cost": 1, "duration_days": 2,
             "affinity_tags": ["feasibility"], "quant": "expert_quote"}
        ],
        "ideas": [
            {"id": "kit", "title": "Home Kit",
             "assumptions": [
                {"id": "A1", "text": "People want it.", "category": "desirability",
                 "tags": ["demand"], "hidden_risk": {"level": "high"}},
                {"id": "A2", "text": "Install under 20 minutes.", "category": "feasibility",
                 "hidden_risk": {"truth": 0.4}}
             ]}
        ]
    }"#;

    #[test]
    fn ideas_inherit_shared_menu() {
        let catalog = Catalog::from_json_str(SMALL).unwrap();
        let idea = catalog.idea(&IdeaId::new("kit")).unwrap();
        assert_eq!(idea.experiments.len(), 2);
        assert_eq!(
            idea.assumption(&AssumptionId::new("A2")).unwrap().hidden_risk,
            HiddenRisk::Truth(0.4)
        );
        assert_eq!(
            idea.experiment(&ExperimentId::new("expert")).unwrap().quant,
            QuantShape::ExpertQuote
        );
    }

    #[test]
    fn unknown_lookups_are_typed() {
        let catalog = Catalog::from_json_str(SMALL).unwrap();
        let idea = catalog.idea(&IdeaId::new("kit")).unwrap();
        assert_eq!(
            idea.assumption(&AssumptionId::new("nope")),
            Err(CatalogError::UnknownAssumption(AssumptionId::new("nope")))
        );
        assert!(matches!(
            catalog.idea(&IdeaId::new("missing")),
            Err(CatalogError::UnknownIdea(_))
        ));
    }

    #[test]
    fn type_tags_include_category() {
        let catalog = Catalog::from_json_str(SMALL).unwrap();
        let idea = &catalog.ideas()[0];
        let tags = idea.assumptions[0].type_tags();
        assert!(tags.contains("demand"));
        assert!(tags.contains("desirability"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn public_view_hides_risk() {
        let catalog = Catalog::from_json_str(SMALL).unwrap();
        let view = catalog.ideas()[0].assumptions[0].public_view();
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("hidden_risk"));
        assert!(!json.contains("high"));
    }

    #[test]
    fn zero_cost_experiment_rejected() {
        let json = SMALL.replace("\"cost\": 1", "\"cost\": 0");
        assert!(matches!(
            Catalog::from_json_str(&json),
            Err(CatalogError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn duplicate_assumption_rejected() {
        let json = SMALL.replace("\"id\": \"A2\"", "\"id\": \"A1\"");
        assert!(matches!(
            Catalog::from_json_str(&json),
            Err(CatalogError::DuplicateId { kind: "assumption", .. })
        ));
    }

    #[test]
    fn truth_out_of_range_rejected() {
        let json = SMALL.replace("0.4", "1.4");
        assert!(matches!(
            Catalog::from_json_str(&json),
            Err(CatalogError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn severity_orders_levels() {
        let low = HiddenRisk::Level(RiskLevel::Low).severity();
        let med = HiddenRisk::Level(RiskLevel::Medium).severity();
        let high = HiddenRisk::Level(RiskLevel::High).severity();
        assert!(low < med && med < high);
        assert_eq!(HiddenRisk::Truth(2.0).severity(), 1.0);
    }
}
