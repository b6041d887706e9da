//! Animated Transitions
//! Interpolates axes and point positions between render requests. A newer
//! request replaces the running animation, starting from whatever is on
//! screen at that moment.

use crate::data::Dataset;
use crate::scale::AxisDomain;
use crate::selection::RenderRequest;

/// d3's default `easeCubicInOut`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// What is drawn at one instant: the axis domain and every record's
/// position as a fraction of the plot area.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub domain: AxisDomain,
    pub positions: Vec<[f64; 2]>,
}

impl Frame {
    /// Resting frame for a request.
    pub fn target(dataset: &Dataset, request: &RenderRequest) -> Self {
        let (x, y) = (request.selection.x(), request.selection.y());
        let positions = dataset
            .records()
            .iter()
            .map(|r| request.domain.normalize(r.value(x) as f64, r.value(y) as f64))
            .collect();
        Self {
            domain: request.domain,
            positions,
        }
    }

    /// Positions in data coordinates of this frame's domain.
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.positions
            .iter()
            .map(|&[u, v]| [self.domain.x.denormalize(u), self.domain.y.denormalize(v)])
            .collect()
    }

    fn lerp(&self, to: &Frame, t: f64) -> Frame {
        let positions = self
            .positions
            .iter()
            .zip(to.positions.iter())
            .map(|(a, b)| [a[0] + (b[0] - a[0]) * t, a[1] + (b[1] - a[1]) * t])
            .collect();
        Frame {
            domain: self.domain.lerp(&to.domain, t),
            positions,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transition {
    generation: u64,
    /// Seconds, on the same clock passed to `sample`.
    start: f64,
    duration: f64,
    from: Frame,
    to: Frame,
}

impl Transition {
    /// A finished transition resting on `request`.
    pub fn settled(dataset: &Dataset, request: &RenderRequest) -> Self {
        let frame = Frame::target(dataset, request);
        Self {
            generation: request.generation,
            start: 0.0,
            duration: 0.0,
            from: frame.clone(),
            to: frame,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ease_cubic_in_out((now - self.start) / self.duration)
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.duration <= 0.0 || now >= self.start + self.duration
    }

    pub fn sample(&self, now: f64) -> Frame {
        if self.is_finished(now) {
            return self.to.clone();
        }
        self.from.lerp(&self.to, self.progress(now))
    }

    /// Animate towards `request` from the frame displayed at `now`.
    /// Returns `false` and leaves the transition alone when the request is
    /// not newer than the one already running.
    pub fn retarget(&mut self, dataset: &Dataset, request: &RenderRequest, now: f64) -> bool {
        if request.generation <= self.generation {
            log::debug!(
                "ignoring stale render request {} (current {})",
                request.generation,
                self.generation
            );
            return false;
        }

        let from = self.sample(now);
        *self = Self {
            generation: request.generation,
            start: now,
            duration: request.duration.as_secs_f64(),
            from,
            to: Frame::target(dataset, request),
        };
        true
    }
}
