use crate::error::{Result, UtilError};
use crate::utils::constants::{DECITAB_INITIAL_MAX, DECITAB_MAX_STAGE};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};
use tracing::debug;

/// Five cascaded decimation factors, largest first
pub type Stages = (u32, u32, u32, u32, u32);

/// Memoized factorizations of decimation ratios into five stages.
///
/// Each entry `(i, j, k, l, m)` satisfies `i >= j >= k >= l >= m >= 1` and
/// `i * j * k * l * m == ratio`, with no stage above 9. The stored tuple is
/// the first one met while searching the stages in ascending order,
/// outermost first. The table only grows.
#[derive(Debug, Default)]
pub struct DecimationTable {
    entries: HashMap<u32, Stages>,
    nmax: u32,
}

impl DecimationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-filled with every ratio up to `nmax`
    pub fn with_max(nmax: u32) -> Self {
        let mut table = Self::new();
        table.extend(nmax);
        table
    }

    /// Largest ratio the table has been built for
    pub fn nmax(&self) -> u32 {
        self.nmax
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the stages for `ratio`, growing the table to `2 * ratio`
    /// first when it has not been built that far.
    pub fn lookup(&mut self, ratio: u32) -> Result<Stages> {
        if ratio > self.nmax {
            self.extend(ratio.saturating_mul(2));
        }

        self.entries
            .get(&ratio)
            .copied()
            .ok_or(UtilError::UnavailableDecimation { ratio })
    }

    fn extend(&mut self, nmax: u32) {
        debug!("building decimation table up to {}", nmax);
        let nmax = u64::from(nmax);
        let tab = &mut self.entries;

        for i in 1..=DECITAB_MAX_STAGE {
            let pi = u64::from(i);
            for j in 1..=i {
                let pj = pi * u64::from(j);
                for k in 1..=j {
                    let pk = pj * u64::from(k);
                    for l in 1..=k {
                        let pl = pk * u64::from(l);
                        for m in 1..=l {
                            let p = pl * u64::from(m);
                            if p > nmax {
                                break;
                            }
                            // p <= nmax fits in u32
                            tab.entry(p as u32).or_insert((i, j, k, l, m));
                        }
                        if pl > nmax {
                            break;
                        }
                    }
                    if pk > nmax {
                        break;
                    }
                }
                if pj > nmax {
                    break;
                }
            }
            if pi > nmax {
                break;
            }
        }

        self.nmax = self.nmax.max(nmax as u32);
    }
}

fn global_table() -> &'static Mutex<DecimationTable> {
    static TABLE: OnceLock<Mutex<DecimationTable>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(DecimationTable::with_max(DECITAB_INITIAL_MAX)))
}

/// Look up `ratio` in the process-wide decimation table.
///
/// The table is created on first use and never cleared.
pub fn decitab(ratio: u32) -> Result<Stages> {
    let mut table = global_table()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    table.lookup(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn product(stages: Stages) -> u32 {
        stages.0 * stages.1 * stages.2 * stages.3 * stages.4
    }

    fn is_ordered(stages: Stages) -> bool {
        let (i, j, k, l, m) = stages;
        i >= j && j >= k && k >= l && l >= m && m >= 1
    }

    #[test]
    fn test_product_invariant() {
        let mut table = DecimationTable::new();
        for ratio in [1, 2, 4, 5, 8, 10, 12, 20, 50, 100, 200, 1000] {
            let stages = table.lookup(ratio).unwrap();
            assert_eq!(product(stages), ratio);
            assert!(is_ordered(stages), "{:?} is not ordered", stages);
        }
    }

    #[test]
    fn test_first_found_policy() {
        let mut table = DecimationTable::new();
        assert_eq!(table.lookup(1).unwrap(), (1, 1, 1, 1, 1));
        assert_eq!(table.lookup(12).unwrap(), (3, 2, 2, 1, 1));
    }

    #[test]
    fn test_memoized() {
        let mut table = DecimationTable::new();
        let first = table.lookup(36).unwrap();
        let size = table.len();
        assert_eq!(table.nmax(), 72);

        assert_eq!(table.lookup(36).unwrap(), first);
        assert_eq!(table.len(), size);
        assert_eq!(table.nmax(), 72);
    }

    #[test]
    fn test_grows_on_demand() {
        let mut table = DecimationTable::with_max(10);
        assert!(!table.is_empty());
        assert_eq!(table.nmax(), 10);

        let stages = table.lookup(96).unwrap();
        assert_eq!(product(stages), 96);
        assert_eq!(table.nmax(), 192);
    }

    #[test]
    fn test_unavailable_ratio() {
        let mut table = DecimationTable::new();
        for ratio in [0, 11, 13, 97] {
            match table.lookup(ratio) {
                Err(UtilError::UnavailableDecimation { ratio: reported }) => {
                    assert_eq!(reported, ratio)
                }
                other => panic!("expected unavailable decimation, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_global_table() {
        let first = decitab(64).unwrap();
        assert_eq!(product(first), 64);
        assert_eq!(decitab(64).unwrap(), first);
        assert!(decitab(11).is_err());
    }
}
