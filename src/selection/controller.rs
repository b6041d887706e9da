//! Selection Controller
//! Owns the current selection and domain, and turns label clicks into
//! generation-tagged render requests.

use super::{LabelClick, Outcome, Selection, SelectionError};
use crate::data::Dataset;
use crate::scale::{compute_domain, AxisDomain, ScaleError};
use std::time::Duration;

/// Instruction for the renderer to move axes, points and point labels to a
/// new mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    /// Strictly increasing per controller; a request supersedes every
    /// request with a lower generation.
    pub generation: u64,
    pub selection: Selection,
    pub domain: AxisDomain,
    pub duration: Duration,
}

pub struct SelectionController {
    selection: Selection,
    domain: AxisDomain,
    generation: u64,
    duration: Duration,
}

impl SelectionController {
    /// Start with the default selection over `dataset`.
    pub fn new(dataset: &Dataset, duration: Duration) -> Result<Self, ScaleError> {
        let selection = Selection::default();
        let domain = compute_domain(dataset, selection)?;
        Ok(Self {
            selection,
            domain,
            generation: 0,
            duration,
        })
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn domain(&self) -> AxisDomain {
        self.domain
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Request that draws the current state without animation.
    pub fn snapshot(&self) -> RenderRequest {
        RenderRequest {
            generation: self.generation,
            selection: self.selection,
            domain: self.domain,
            duration: Duration::ZERO,
        }
    }

    /// Handle a label click. Returns `None` when the label was already
    /// active. On error the controller state is left untouched.
    pub fn handle_click(
        &mut self,
        dataset: &Dataset,
        click: LabelClick,
    ) -> Result<Option<RenderRequest>, SelectionError> {
        let next = match self.selection.apply(click) {
            Outcome::Unchanged => return Ok(None),
            Outcome::Changed { next, .. } => next,
        };

        let domain = compute_domain(dataset, next)?;

        log::debug!(
            "selection {:?} -> {:?} (generation {})",
            self.selection,
            next,
            self.generation + 1
        );

        self.selection = next;
        self.domain = domain;
        self.generation += 1;

        Ok(Some(RenderRequest {
            generation: self.generation,
            selection: next,
            domain,
            duration: self.duration,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Axis, Field, Record};

    fn alabama() -> Dataset {
        Dataset::new(vec![Record::new(
            "Alabama",
            "AL",
            [20, 12, 39, 24, 42000, 33],
        )])
    }

    fn controller(ds: &Dataset) -> SelectionController {
        SelectionController::new(ds, Duration::from_millis(1800)).unwrap()
    }

    #[test]
    fn clicking_age_keeps_healthcare_and_rescales_x() {
        let ds = alabama();
        let mut ctl = controller(&ds);
        let click = LabelClick::new(Axis::X, Field::Age).unwrap();

        let request = ctl.handle_click(&ds, click).unwrap().unwrap();

        assert_eq!(request.selection.x(), Field::Age);
        assert_eq!(request.selection.y(), Field::Healthcare);
        assert!((request.domain.x.min - 31.2).abs() < 1e-9);
        assert!((request.domain.x.max - 42.9).abs() < 1e-9);
        assert!((request.domain.y.min - 9.6).abs() < 1e-9);
        assert_eq!(request.generation, 1);
        assert_eq!(request.duration, Duration::from_millis(1800));
        assert_eq!(ctl.selection(), request.selection);
    }

    #[test]
    fn clicking_active_label_emits_nothing() {
        let ds = alabama();
        let mut ctl = controller(&ds);
        let before = (ctl.selection(), ctl.domain(), ctl.generation());

        let click = LabelClick::new(Axis::Y, Field::Healthcare).unwrap();
        assert_eq!(ctl.handle_click(&ds, click).unwrap(), None);
        assert_eq!((ctl.selection(), ctl.domain(), ctl.generation()), before);
    }

    #[test]
    fn generations_increase_with_each_change() {
        let ds = alabama();
        let mut ctl = controller(&ds);
        let clicks = [
            LabelClick::new(Axis::X, Field::Income).unwrap(),
            LabelClick::new(Axis::Y, Field::Obesity).unwrap(),
            LabelClick::new(Axis::X, Field::Poverty).unwrap(),
        ];
        let generations: Vec<u64> = clicks
            .into_iter()
            .filter_map(|c| ctl.handle_click(&ds, c).unwrap())
            .map(|r| r.generation)
            .collect();
        assert_eq!(generations, vec![1, 2, 3]);
        assert_eq!(ctl.selection().y(), Field::Obesity);
    }

    #[test]
    fn failed_rescale_leaves_state_untouched() {
        let ds = alabama();
        let mut ctl = controller(&ds);
        let click = LabelClick::new(Axis::X, Field::Age).unwrap();

        let err = ctl.handle_click(&Dataset::default(), click).unwrap_err();
        assert_eq!(err, SelectionError::Scale(ScaleError::EmptyDataset));
        assert_eq!(ctl.selection(), Selection::default());
        assert_eq!(ctl.generation(), 0);
    }
}
