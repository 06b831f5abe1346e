//! Expands a requested point set into everything needed to calculate it.

use crate::points::types::{PointId, UnknownPoint};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    UnknownPoint(#[from] UnknownPoint),
    #[error("Dependency cycle between points: {}", format_cycle(.path))]
    DependencyCycle { path: Vec<PointId> },
}

fn format_cycle(path: &[PointId]) -> String {
    path.iter()
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// The two tiers of a chart request.
///
/// `requested` is what the caller asked to see; `calculation` adds every
/// point those depend on. Output is always filtered back to `requested`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSelection {
    requested: BTreeSet<PointId>,
    calculation: BTreeSet<PointId>,
}

impl PointSelection {
    /// Resolve against the static point catalogue.
    pub fn resolve<I>(requested: I) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = PointId>,
    {
        Self::resolve_with(requested, |point| point.depends_on())
    }

    /// Parse names, then resolve.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ResolveError> {
        let requested = names
            .iter()
            .map(|name| PointId::from_name(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::resolve(requested)
    }

    /// Resolve using an arbitrary dependency function.
    ///
    /// Dependencies are followed transitively until the set stops growing.
    /// A cycle anywhere in the reachable graph is rejected.
    pub fn resolve_with<I, F>(requested: I, dependencies: F) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = PointId>,
        F: Fn(PointId) -> &'static [PointId],
    {
        let requested: BTreeSet<PointId> = requested.into_iter().collect();

        let mut done = BTreeSet::new();
        let mut stack = Vec::new();
        for &point in &requested {
            check_acyclic(point, &dependencies, &mut stack, &mut done)?;
        }

        let mut calculation = requested.clone();
        loop {
            let additions: Vec<PointId> = calculation
                .iter()
                .flat_map(|&point| dependencies(point).iter().copied())
                .filter(|dep| !calculation.contains(dep))
                .collect();
            if additions.is_empty() {
                break;
            }
            calculation.extend(additions);
        }

        info!(
            "Requested points: {:?}; calculating: {:?}",
            requested, calculation
        );

        Ok(Self {
            requested,
            calculation,
        })
    }

    pub fn requested(&self) -> &BTreeSet<PointId> {
        &self.requested
    }

    pub fn calculation(&self) -> &BTreeSet<PointId> {
        &self.calculation
    }

    pub fn is_requested(&self, point: PointId) -> bool {
        self.requested.contains(&point)
    }

    pub fn needs(&self, point: PointId) -> bool {
        self.calculation.contains(&point)
    }

    /// Points calculated only because something requested depends on them
    pub fn internal_only(&self) -> impl Iterator<Item = PointId> + '_ {
        self.calculation
            .iter()
            .copied()
            .filter(move |p| !self.requested.contains(p))
    }
}

fn check_acyclic<F>(
    point: PointId,
    dependencies: &F,
    stack: &mut Vec<PointId>,
    done: &mut BTreeSet<PointId>,
) -> Result<(), ResolveError>
where
    F: Fn(PointId) -> &'static [PointId],
{
    if done.contains(&point) {
        return Ok(());
    }
    if let Some(start) = stack.iter().position(|&p| p == point) {
        let mut path = stack[start..].to_vec();
        path.push(point);
        return Err(ResolveError::DependencyCycle { path });
    }

    stack.push(point);
    for &dep in dependencies(point) {
        check_acyclic(dep, dependencies, stack, done)?;
    }
    stack.pop();
    done.insert(point);
    Ok(())
}
