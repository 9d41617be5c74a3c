//! Quantitative snippet generators.
//!
//! One pure generator per [`QuantShape`], selected through [`generator`].
//! Every generator takes the success probability the outcome was drawn with
//! and scales its headline numbers with it, so a likelier success reads as a
//! better metric. Values stay inside realistic bounds for each metric.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use scrappy_types::{QuantFigure, QuantShape, QuantSnippet};

/// Signature shared by all snippet generators.
pub type QuantGenerator = fn(f64, &mut dyn RngCore) -> QuantSnippet;

/// Generator lookup table keyed by outcome shape.
pub fn generator(shape: QuantShape) -> QuantGenerator {
    match shape {
        QuantShape::Funnel => funnel,
        QuantShape::Conversion => conversion,
        QuantShape::PassRate => pass_rate,
        QuantShape::Lift => lift,
        QuantShape::UsageLog => usage_log,
        QuantShape::TimeTrial => time_trial,
        QuantShape::ExpertQuote => expert_quote,
    }
}

/// Generate a snippet for `shape` at success probability `p`.
pub fn generate(shape: QuantShape, p: f64, rng: &mut dyn RngCore) -> QuantSnippet {
    generator(shape)(p.clamp(0.0, 1.0), rng)
}

fn lerp(lo: f64, hi: f64, t: f64) -> f64 {
    lo + (hi - lo) * t
}

/// Multiplicative noise of ±15%.
fn jitter(rng: &mut dyn RngCore) -> f64 {
    rng.gen_range(0.85..=1.15)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Binomial draw by repeated Bernoulli trials.
fn count_successes(rng: &mut dyn RngCore, n: u32, p: f64) -> u32 {
    let p = p.clamp(0.0, 1.0);
    (0..n).filter(|_| rng.gen_bool(p)).count() as u32
}

fn funnel(p: f64, rng: &mut dyn RngCore) -> QuantSnippet {
    let visits: u32 = rng.gen_range(600..=1800);
    let ctr = (lerp(0.012, 0.07, p) * jitter(rng)).clamp(0.005, 0.12);
    let clicks = (visits as f64 * ctr).round();
    // Sign-ups come out of the clicks, never the raw visits.
    let click_conversion = (lerp(0.25, 0.8, p) * jitter(rng)).clamp(0.05, 0.95);
    let signups = (clicks * click_conversion).round();
    let ctr_pct = round1(ctr * 100.0);
    let signup_pct = round1(signups / visits as f64 * 100.0);
    QuantSnippet {
        headline: format!(
            "{} visits • CTR {:.1}% ({} clicks) • {} sign-ups ({:.1}%)",
            visits, ctr_pct, clicks, signups, signup_pct
        ),
        figures: vec![
            QuantFigure::new("visits", visits as f64, "visits"),
            QuantFigure::new("ctr", ctr_pct, "%"),
            QuantFigure::new("clicks", clicks, "clicks"),
            QuantFigure::new("signups", signups, "sign-ups"),
            QuantFigure::new("signup_rate", signup_pct, "%"),
        ],
    }
}

fn conversion(p: f64, rng: &mut dyn RngCore) -> QuantSnippet {
    let leads: u32 = rng.gen_range(60..=220);
    let rate = (lerp(0.01, 0.09, p) * jitter(rng)).clamp(0.005, 0.12);
    let confirmed = (leads as f64 * rate).floor();
    let pct = if leads == 0 {
        0.0
    } else {
        round1(confirmed / leads as f64 * 100.0)
    };
    QuantSnippet {
        headline: format!(
            "{} leads → {} confirmed payments ({:.1}%)",
            leads, confirmed, pct
        ),
        figures: vec![
            QuantFigure::new("leads", leads as f64, "leads"),
            QuantFigure::new("confirmed", confirmed, "payments"),
            QuantFigure::new("conversion", pct, "%"),
        ],
    }
}

fn pass_rate(p: f64, rng: &mut dyn RngCore) -> QuantSnippet {
    let n: u32 = rng.gen_range(3..=8);
    let k = count_successes(rng, n, lerp(0.15, 0.9, p));
    QuantSnippet {
        headline: format!("{}/{} participants reported a clear improvement", k, n),
        figures: vec![
            QuantFigure::new("participants", n as f64, "people"),
            QuantFigure::new("passed", k as f64, "people"),
        ],
    }
}

fn lift(p: f64, rng: &mut dyn RngCore) -> QuantSnippet {
    let lift_pp = round1(lerp(-0.4, 2.0, p) + rng.gen_range(-0.3..=0.3));
    let impressions: u32 = rng.gen_range(2_000..=8_000);
    QuantSnippet {
        headline: format!(
            "Variant headline CTR {:+.1}pp vs control over {} impressions",
            lift_pp, impressions
        ),
        figures: vec![
            QuantFigure::new("lift", lift_pp, "pp"),
            QuantFigure::new("impressions", impressions as f64, "impressions"),
        ],
    }
}

fn usage_log(p: f64, rng: &mut dyn RngCore) -> QuantSnippet {
    let window: u32 = *[7u32, 14].choose(rng).unwrap_or(&7);
    let improved = count_successes(rng, window, lerp(0.15, 0.9, p));
    QuantSnippet {
        headline: format!("Improvement logged on {} of {} tracked days", improved, window),
        figures: vec![
            QuantFigure::new("tracked_days", window as f64, "days"),
            QuantFigure::new("improved_days", improved as f64, "days"),
        ],
    }
}

fn time_trial(p: f64, rng: &mut dyn RngCore) -> QuantSnippet {
    let minutes = (lerp(38.0, 12.0, p) * jitter(rng)).round().max(1.0);
    let defects = count_successes(rng, 4, lerp(0.6, 0.05, p));
    QuantSnippet {
        headline: format!("Task completed in {} min • {} defects observed", minutes, defects),
        figures: vec![
            QuantFigure::new("minutes", minutes, "min"),
            QuantFigure::new("defects", defects as f64, "defects"),
        ],
    }
}

const SUPPORTIVE_QUOTES: [&str; 3] = [
    "Feasible as described if the standard sizes hold.",
    "We see this need weekly; customers ask for it.",
    "The numbers work at this price point.",
];

const CAUTIOUS_QUOTES: [&str; 3] = [
    "Possible, but expect a learning curve.",
    "Depends heavily on the channel partner.",
    "Margins are thin unless rebates apply.",
];

const SKEPTICAL_QUOTES: [&str; 3] = [
    "I have not seen this work outside pilots.",
    "Compliance will slow this down considerably.",
    "Customers say yes in interviews but rarely pay.",
];

fn expert_quote(p: f64, rng: &mut dyn RngCore) -> QuantSnippet {
    let supportive = count_successes(rng, 3, p);
    let pool: &[&str] = if p >= 0.66 {
        &SUPPORTIVE_QUOTES
    } else if p >= 0.4 {
        &CAUTIOUS_QUOTES
    } else {
        &SKEPTICAL_QUOTES
    };
    let quote = pool.choose(rng).copied().unwrap_or("No clear view.");
    QuantSnippet {
        headline: format!("{}/3 experts supportive: \"{}\"", supportive, quote),
        figures: vec![QuantFigure::new("supportive_experts", supportive as f64, "of 3")],
    }
}
