//! Random pick of one suggestion from the candidates

use rand::RngExt;
use serde::{Deserialize, Serialize};

/// Index formula used to pick a candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Every candidate is equally likely
    #[default]
    Uniform,
    /// `floor(random * (len - 1))`: the last candidate of two or more is never picked.
    /// Kept for parity with suggestions produced by earlier versions of the bot.
    Legacy,
}

/// Pick one item, or `None` when there is nothing to choose from
pub fn pick<'a, T, R>(items: &'a [T], mode: SelectionMode, rng: &mut R) -> Option<&'a T>
where
    R: RngExt,
{
    if items.is_empty() {
        return None;
    }

    let index = match mode {
        SelectionMode::Uniform => rng.random_range(0..items.len()),
        SelectionMode::Legacy => {
            let span = (items.len() - 1) as f64;
            (rng.random::<f64>() * span).floor() as usize
        }
    };

    items.get(index)
}
