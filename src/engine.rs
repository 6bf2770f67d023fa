use tracing::debug;
use tracing::info;
use tracing::trace;

use crate::grid::Grid;
use crate::grid::GridError;
use crate::rule_set::Rule;

/// Runs a [`Grid`] forward one generation at a time under a swappable [`Rule`].
pub struct Engine {
    grid: Grid,

    /// Live cells in the current generation
    total_living: usize,

    /// Change in `total_living` caused by the most recent [`Engine::advance`]
    living_delta: isize,

    /// Generations advanced since construction
    generation: u64,

    rule: Box<dyn Rule>,
}

impl Engine {
    pub fn new<R>(rows: usize, cols: usize, rule: R) -> Result<Self, GridError>
    where
        R: Rule + 'static,
    {
        let grid = Grid::new(rows, cols)?;
        let rule: Box<dyn Rule> = Box::new(rule);

        info!(rows, cols, rule = %rule.name(), "created engine");

        Ok(Self {
            grid,
            total_living: 0,
            living_delta: 0,
            generation: 0,
            rule,
        })
    }

    /// Read-only view of the current generation
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Sets a cell of the current generation and keeps `total_living` in step with it.
    ///
    /// Meant for placing patterns before the first [`Engine::advance`]. `living_delta` is left
    /// alone, since it describes the last generation step only.
    pub fn seed(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        let was = self.grid.get(row, col)?;
        self.grid.set(row, col, alive)?;

        match (was, alive) {
            (false, true) => self.total_living += 1,
            (true, false) => self.total_living -= 1,
            _ => {}
        }

        Ok(())
    }

    /// Replaces the active rule, returning the previous one.
    pub fn set_rule<R>(&mut self, rule: R) -> Box<dyn Rule>
    where
        R: Rule + 'static,
    {
        self.replace_rule(Box::new(rule))
    }

    /// Like [`Engine::set_rule`], for a rule that is already boxed.
    pub fn replace_rule(&mut self, rule: Box<dyn Rule>) -> Box<dyn Rule> {
        debug!(from = %self.rule.name(), to = %rule.name(), "switching rule");

        std::mem::replace(&mut self.rule, rule)
    }

    pub fn rule_name(&self) -> String {
        self.rule.name()
    }

    /// Advance the grid by one generation.
    pub fn advance(&mut self) {
        let rule = &mut self.rule;
        let total = self.grid.step(|alive, n| rule.next_state(alive, n));

        self.living_delta = total as isize - self.total_living as isize;
        self.total_living = total;
        self.generation += 1;

        trace!(
            generation = self.generation,
            total_living = self.total_living,
            living_delta = self.living_delta,
            "advanced"
        );
    }

    pub fn total_living(&self) -> usize {
        self.total_living
    }

    pub fn living_delta(&self) -> isize {
        self.living_delta
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ends the session, releasing the grid and the rule.
    pub fn destroy(self) {
        debug!(generation = self.generation, "destroying engine");

        self.grid.destroy();
    }
}
