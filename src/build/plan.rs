use super::inventory::Unit;
use super::stale::{BuildMode, Staleness};

/// Units to (re)compile, in discovery order, and whether to relink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    pub mode: BuildMode,
    pub units: Vec<Unit>,
    pub link_required: bool,
}

impl BuildPlan {
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

pub fn plan(staleness: &Staleness, units: &[Unit]) -> BuildPlan {
    let selected: Vec<Unit> = match staleness.mode {
        BuildMode::Fresh => units.to_vec(),
        BuildMode::Incremental => units
            .iter()
            .filter(|u| staleness.is_stale(&u.name))
            .cloned()
            .collect(),
    };

    BuildPlan {
        mode: staleness.mode,
        link_required: !selected.is_empty(),
        units: selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::stale::{StaleReason, classify};
    use crate::timestamp::Stamp;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    fn at(secs: u64) -> Stamp {
        Stamp::Known(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
    }

    fn unit(name: &str) -> Unit {
        Unit {
            name: name.to_string(),
            source: PathBuf::from(format!("src/{name}.cpp")),
            artifact: PathBuf::from(format!("obj/DEBUG/{name}.o")),
            source_stamp: at(10),
            artifact_stamp: None,
        }
    }

    #[test]
    fn test_fresh_plans_everything() {
        let units = vec![unit("c"), unit("a"), unit("b")];
        let sources = units.iter().map(|u| (u.name.clone(), at(10))).collect();
        let plan = plan(&classify(&sources, &BTreeMap::new()), &units);
        assert_eq!(plan.mode, BuildMode::Fresh);
        assert_eq!(plan.units, units);
        assert!(plan.link_required);
    }

    #[test]
    fn test_fresh_with_no_units_is_a_no_op() {
        let plan = plan(&classify(&BTreeMap::new(), &BTreeMap::new()), &[]);
        assert!(plan.is_empty());
        assert!(!plan.link_required);
    }

    #[test]
    fn test_incremental_keeps_discovery_order() {
        let units = vec![unit("zeta"), unit("alpha"), unit("mid")];
        let staleness = Staleness {
            mode: BuildMode::Incremental,
            stale: BTreeMap::from([
                ("alpha".to_string(), StaleReason::SourceNewer),
                ("zeta".to_string(), StaleReason::SourceNewer),
            ]),
        };
        let plan = plan(&staleness, &units);
        let names: Vec<&str> = plan.units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert!(plan.link_required);
    }

    #[test]
    fn test_incremental_nothing_stale() {
        let units = vec![unit("a")];
        let staleness = Staleness {
            mode: BuildMode::Incremental,
            stale: BTreeMap::new(),
        };
        let plan = plan(&staleness, &units);
        assert!(plan.is_empty());
        assert!(!plan.link_required);
    }
}
