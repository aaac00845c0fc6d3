//! Manually curated layouts.
//!
//! The composer mirrors hand-building a collage: there is always an active
//! line, phrases picked from the raw pool are appended to it, and finishing
//! drops empty lines before styling what is left.

use super::style::create_fragment;
use super::{Layout, Line};
use crate::errors::{AppError, AppResult};
use rand::Rng;
use tracing::debug;

/// Builds a layout line by line from a phrase pool.
#[derive(Debug, Clone)]
pub struct ManualComposer {
    pool: Vec<String>,
    lines: Vec<Vec<String>>,
    active: usize,
}

impl ManualComposer {
    /// Starts with a single empty, active line.
    pub fn new(pool: Vec<String>) -> Self {
        Self {
            pool,
            lines: vec![Vec::new()],
            active: 0,
        }
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn lines(&self) -> &[Vec<String>] {
        &self.lines
    }

    pub fn active_line(&self) -> usize {
        self.active
    }

    /// Makes `line` the target of subsequent [`push`](Self::push) calls.
    pub fn select_line(&mut self, line: usize) -> AppResult<()> {
        if line >= self.lines.len() {
            return Err(AppError::Collage(format!(
                "line {} does not exist (have {})",
                line,
                self.lines.len()
            )));
        }
        self.active = line;
        Ok(())
    }

    /// Appends an empty line and makes it active.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(Vec::new());
        self.active = self.lines.len() - 1;
        self.active
    }

    /// Appends the pool phrase at `pool_index` to the active line.
    pub fn push(&mut self, pool_index: usize) -> AppResult<()> {
        let phrase = self.pool.get(pool_index).ok_or_else(|| {
            AppError::Collage(format!(
                "pool index {} out of range (pool has {} phrases)",
                pool_index,
                self.pool.len()
            ))
        })?;
        self.lines[self.active].push(phrase.clone());
        Ok(())
    }

    /// Removes the phrase at `position` from `line`.
    pub fn remove(&mut self, line: usize, position: usize) -> AppResult<String> {
        let phrases = self
            .lines
            .get_mut(line)
            .ok_or_else(|| AppError::Collage(format!("line {} does not exist", line)))?;
        if position >= phrases.len() {
            return Err(AppError::Collage(format!(
                "line {} has no phrase at position {}",
                line, position
            )));
        }
        Ok(phrases.remove(position))
    }

    /// Styles every phrase and returns the non-empty lines as a layout.
    pub fn finish<R: Rng>(self, rng: &mut R) -> Layout {
        let lines: Vec<Line> = self
            .lines
            .into_iter()
            .filter(|phrases| !phrases.is_empty())
            .map(|phrases| {
                Line::from(
                    phrases
                        .iter()
                        .map(|phrase| create_fragment(phrase, rng))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        debug!("Composed manual layout with {} lines", lines.len());
        Layout::from(lines)
    }
}
