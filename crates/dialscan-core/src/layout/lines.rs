use crate::model::{PositionedFragment, TextLine};

/// A line under construction. Tracks the mean vertical center of every
/// fragment absorbed so far.
#[derive(Debug, Clone)]
struct LineAggregate {
    fragments: Vec<PositionedFragment>,
    sum_y: f64,
    center_y: f64,
}

impl LineAggregate {
    fn open(fragment: PositionedFragment) -> Self {
        LineAggregate {
            sum_y: fragment.center_y,
            center_y: fragment.center_y,
            fragments: vec![fragment],
        }
    }

    fn accepts(&self, fragment: &PositionedFragment, y_tol: f64) -> bool {
        (self.center_y - fragment.center_y).abs() <= y_tol
    }

    fn absorb(&mut self, fragment: PositionedFragment) {
        self.sum_y += fragment.center_y;
        self.fragments.push(fragment);
        self.center_y = self.sum_y / self.fragments.len() as f64;
    }

    fn finish(mut self) -> TextLine {
        self.fragments.sort_by(|a, b| a.left_x.total_cmp(&b.left_x));
        let text = self
            .fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();
        TextLine {
            center_y: self.center_y,
            fragments: self.fragments,
            text,
        }
    }
}

/// Group fragments into text lines, top to bottom.
///
/// Fragments are visited in `(center_y, left_x)` order and attached to the
/// first line (in creation order) whose running center is within `y_tol`.
/// Lines never split once formed, even if their center drifts.
pub fn cluster_lines(mut fragments: Vec<PositionedFragment>, y_tol: f64) -> Vec<TextLine> {
    fragments.sort_by(|a, b| {
        a.center_y
            .total_cmp(&b.center_y)
            .then(a.left_x.total_cmp(&b.left_x))
    });

    let mut open: Vec<LineAggregate> = Vec::new();
    for fragment in fragments {
        match open.iter_mut().find(|line| line.accepts(&fragment, y_tol)) {
            Some(line) => line.absorb(fragment),
            None => open.push(LineAggregate::open(fragment)),
        }
    }

    let mut lines: Vec<TextLine> = open.into_iter().map(LineAggregate::finish).collect();
    lines.sort_by(|a, b| a.center_y.total_cmp(&b.center_y));
    lines
}
