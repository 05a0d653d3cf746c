//! Deadline cascading.
//!
//! Given due tasks and a day budget, derives due dates for their prerequisite
//! closures so that each prerequisite finishes before the dependent task
//! needs it. The split is proportional to effort: a task keeps
//! `ceil(budget · own_hours / square_one_hours)` days of the budget for
//! itself and pushes the rest onto its prerequisites, recursively.
//!
//! This is proportional, not critical-path, allocation. Square-one hours —
//! the summed effort of a task and its full transitive prerequisite closure,
//! each task counted once — are memoized per root within a single run.
//!
//! # Failure policy
//!
//! Transactional. Due dates and due flags are snapshotted before the run and
//! restored if any root's cascade proves infeasible, so the registry is never
//! left partially mutated.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate};

use crate::error::PlanError;
use crate::models::Task;
use crate::validation;

/// Total remaining effort of a task and its transitive prerequisite closure.
///
/// Each task is counted exactly once, even when reachable via multiple paths
/// (diamond-shaped dependency structures). Out-of-range or non-completable
/// handles contribute nothing; validation reports them separately.
pub fn square_one_hours(tasks: &[Task], root: usize) -> f64 {
    fn aux(tasks: &[Task], id: usize, seen: &mut HashSet<usize>) -> f64 {
        if id >= tasks.len() || !seen.insert(id) {
            return 0.0;
        }
        let Some(c) = tasks[id].completable() else {
            return 0.0;
        };
        let below: f64 = c.prereqs.iter().map(|p| aux(tasks, p.index(), seen)).sum();
        c.total_hours + below
    }
    aux(tasks, root, &mut HashSet::new())
}

/// Cascades due dates from every due task onto its prerequisite closure.
///
/// `budget_days` is the planning horizon granted to each due root. Fails
/// with [`PlanError::DeadlineInfeasible`] if any task in a closure cannot
/// fit its share of the budget, leaving the registry untouched.
pub fn assign_due_dates(tasks: &mut [Task], budget_days: i64) -> Result<(), PlanError> {
    // The recursion below has no cycle guard of its own; refuse cyclic input.
    if let Some(id) = validation::find_cycle(tasks) {
        return Err(PlanError::InvalidInput(format!(
            "prerequisite cycle involving '{}'",
            tasks[id.index()].name
        )));
    }

    let snapshot: Vec<Option<(Option<NaiveDate>, bool)>> = tasks
        .iter()
        .map(|t| t.completable().map(|c| (c.due, c.due_task)))
        .collect();

    let roots: Vec<usize> = (0..tasks.len())
        .filter(|&i| tasks[i].is_due_task())
        .collect();

    for root in roots {
        // Square-one sums are a property of the graph below a task, stable
        // only within one root's cascade; the memo is scoped accordingly.
        let mut cache = HashMap::new();
        if let Err(e) = cascade_from(tasks, root, budget_days, &mut cache) {
            for (task, snap) in tasks.iter_mut().zip(&snapshot) {
                if let (Some(c), Some((due, flag))) = (task.completable_mut(), snap) {
                    c.due = *due;
                    c.due_task = *flag;
                }
            }
            return Err(e);
        }
    }
    Ok(())
}

fn cascade_from(
    tasks: &mut [Task],
    id: usize,
    budget_days: i64,
    cache: &mut HashMap<usize, f64>,
) -> Result<(), PlanError> {
    let (name, total_hours, min_days, due, prereqs) = {
        let task = &tasks[id];
        let c = task
            .completable()
            .ok_or_else(|| PlanError::InvalidInput(format!("'{}' is not completable", task.name)))?;
        let min_days = task.min_days().unwrap_or(0);
        (
            task.name.clone(),
            c.total_hours,
            min_days,
            c.due,
            c.prereqs.clone(),
        )
    };

    if budget_days < min_days {
        return Err(PlanError::DeadlineInfeasible {
            task: name,
            min_days,
            budget_days,
        });
    }

    let due = due.ok_or_else(|| {
        PlanError::InvalidInput(format!("due task '{name}' has no due date assigned"))
    })?;

    if prereqs.is_empty() {
        return Ok(());
    }

    let square_one = match cache.get(&id) {
        Some(&hours) => hours,
        None => {
            let hours = square_one_hours(tasks, id);
            cache.insert(id, hours);
            hours
        }
    };
    if square_one <= 0.0 {
        return Err(PlanError::InvalidInput(format!(
            "zero total-effort prerequisite subgraph rooted at '{name}'"
        )));
    }

    let last_days = (budget_days as f64 * total_hours / square_one).ceil() as i64;
    let pre_due = due - Duration::days(last_days);

    for p in prereqs {
        let prereq = tasks[p.index()]
            .completable_mut()
            .ok_or_else(|| PlanError::InvalidInput("prerequisite is not completable".into()))?;
        prereq.due_task = true;
        prereq.push_up_due_date(pre_due);
        cascade_from(tasks, p.index(), budget_days - last_days, cache)?;
    }
    Ok(())
}
