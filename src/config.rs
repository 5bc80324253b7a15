use crate::{generators::Generator, maze::Coord, solvers::Solver};

pub const SEED_VAR: &str = "MAZESTEP_SEED";
pub const STEPS_PER_SEC_VAR: &str = "MAZESTEP_STEPS_PER_SEC";
pub const ANIMATE_VAR: &str = "MAZESTEP_ANIMATE";

/// Engine-wide settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for every generation run. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn seeded(seed: u64) -> Self {
        EngineConfig { seed: Some(seed) }
    }

    /// Reads `MAZESTEP_SEED` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup(SEED_VAR).and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(err) => {
                tracing::warn!(value = %raw, %err, "ignoring unparsable {SEED_VAR}");
                None
            }
        });
        EngineConfig { seed }
    }
}

/// Settings of one command-line run: what to generate and solve, and how to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub rows: u16,
    pub cols: u16,
    pub generator: String,
    pub solver: String,
    pub start: Coord,
    pub goal: Coord,
    /// 0 runs unthrottled.
    pub steps_per_second: u32,
    pub animate: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        let (rows, cols) = (10, 20);
        RunConfig {
            rows,
            cols,
            generator: Generator::RecurBacktrack.name().to_owned(),
            solver: Solver::AStar.name().to_owned(),
            start: Coord::new(0, 0),
            goal: Coord::new(rows - 1, cols - 1),
            steps_per_second: 0,
            animate: false,
        }
    }
}

impl RunConfig {
    /// Parses positional arguments `rows cols [generator] [solver]` (executable name
    /// already skipped) and the pacing variables from `lookup`.
    pub fn parse<I>(args: I, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = RunConfig::default();
        let mut args = args.into_iter();

        if let Some(rows) = args.next() {
            config.rows = parse_dimension("rows", &rows)?;
            let cols = args
                .next()
                .ok_or_else(|| "expected both rows and cols".to_owned())?;
            config.cols = parse_dimension("cols", &cols)?;
        }
        if let Some(generator) = args.next() {
            config.generator = generator;
        }
        if let Some(solver) = args.next() {
            config.solver = solver;
        }
        if let Some(extra) = args.next() {
            return Err(format!("unexpected argument {extra:?}"));
        }
        config.goal = Coord::new(config.rows - 1, config.cols - 1);

        if let Some(raw) = lookup(STEPS_PER_SEC_VAR) {
            config.steps_per_second = raw
                .trim()
                .parse()
                .map_err(|err| format!("invalid {STEPS_PER_SEC_VAR} {raw:?}: {err}"))?;
        }
        if let Some(raw) = lookup(ANIMATE_VAR) {
            config.animate = parse_flag(&raw).ok_or_else(|| {
                format!("invalid {ANIMATE_VAR} {raw:?}: expected 1/0, true/false, on/off")
            })?;
        }
        Ok(config)
    }

    /// [`RunConfig::parse`] over the process arguments and environment.
    pub fn from_env() -> Result<Self, String> {
        Self::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
    }
}

fn parse_dimension(what: &str, raw: &str) -> Result<u16, String> {
    match raw.parse::<u16>() {
        Ok(0) => Err(format!("{what} must be at least 1")),
        Ok(n) => Ok(n),
        Err(err) => Err(format!("invalid {what} {raw:?}: {err}")),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_seed_from_lookup() {
        let config = EngineConfig::from_lookup(|key| (key == SEED_VAR).then(|| " 42 ".into()));
        assert_eq!(config, EngineConfig::seeded(42));
        assert_eq!(EngineConfig::from_lookup(no_env).seed, None);
        // Garbage is ignored rather than fatal
        let config = EngineConfig::from_lookup(|_| Some("forty-two".into()));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_run_defaults() {
        let config = RunConfig::parse(args(&[]), no_env).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!((config.rows, config.cols), (10, 20));
        assert_eq!(config.generator, "recursive-backtracker");
        assert_eq!(config.solver, "a-star");
        assert_eq!(config.goal, Coord::new(9, 19));
        assert_eq!(config.steps_per_second, 0);
        assert!(!config.animate);
    }

    #[test]
    fn test_run_positional_args() {
        let config = RunConfig::parse(args(&["5", "7", "kruskal", "bfs"]), no_env).unwrap();
        assert_eq!((config.rows, config.cols), (5, 7));
        assert_eq!(config.generator, "kruskal");
        assert_eq!(config.solver, "bfs");
        assert_eq!(config.start, Coord::new(0, 0));
        assert_eq!(config.goal, Coord::new(4, 6));
    }

    #[test]
    fn test_run_rejects_bad_args() {
        assert!(RunConfig::parse(args(&["5"]), no_env).is_err());
        assert!(RunConfig::parse(args(&["0", "3"]), no_env).is_err());
        assert!(RunConfig::parse(args(&["3", "x"]), no_env).is_err());
        assert!(RunConfig::parse(args(&["3", "3", "prim", "bfs", "more"]), no_env).is_err());
    }

    #[test]
    fn test_run_pacing_from_env() {
        let env = |key: &str| match key {
            STEPS_PER_SEC_VAR => Some("120".to_owned()),
            ANIMATE_VAR => Some("on".to_owned()),
            _ => None,
        };
        let config = RunConfig::parse(args(&[]), env).unwrap();
        assert_eq!(config.steps_per_second, 120);
        assert!(config.animate);

        let bad = |key: &str| (key == ANIMATE_VAR).then(|| "maybe".to_owned());
        assert!(RunConfig::parse(args(&[]), bad).is_err());
    }
}
