/// What currently holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(usize),
    Submit,
}

/// Focus cycling over `field_count` fields followed by the submit button.
#[derive(Debug, Clone, Default)]
pub struct FocusRing {
    field_count: usize,
    index: usize,
}

impl FocusRing {
    pub fn new(field_count: usize) -> Self {
        Self {
            field_count,
            index: 0,
        }
    }

    /// Keeps a focused field focused; a focused submit button stays on the
    /// button. An empty ring gains focus on its first field.
    pub fn set_field_count(&mut self, field_count: usize) {
        if self.field_count > 0 && self.index >= self.field_count {
            self.index = field_count;
        }
        self.field_count = field_count;
        self.index = self.index.min(field_count);
    }

    pub fn current(&self) -> FocusTarget {
        if self.index < self.field_count {
            FocusTarget::Field(self.index)
        } else {
            FocusTarget::Submit
        }
    }

    /// Moves by `direction` slots, wrapping around. Returns the new target.
    pub fn shift(&mut self, direction: isize) -> FocusTarget {
        let len = (self.field_count + 1) as isize;
        self.index = ((self.index as isize + direction).rem_euclid(len)) as usize;
        self.current()
    }

    pub fn first(&mut self) -> FocusTarget {
        self.index = 0;
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::{FocusRing, FocusTarget};

    #[test]
    fn cycles_through_fields_then_submit() {
        let mut ring = FocusRing::new(2);
        assert_eq!(ring.current(), FocusTarget::Field(0));
        assert_eq!(ring.shift(1), FocusTarget::Field(1));
        assert_eq!(ring.shift(1), FocusTarget::Submit);
        assert_eq!(ring.shift(1), FocusTarget::Field(0));
        assert_eq!(ring.shift(-1), FocusTarget::Submit);
    }

    #[test]
    fn first_field_focused_as_fields_are_added() {
        let mut ring = FocusRing::new(0);
        ring.set_field_count(1);
        ring.set_field_count(2);
        assert_eq!(ring.current(), FocusTarget::Field(0));
    }

    #[test]
    fn submit_keeps_focus_when_fields_are_added() {
        let mut ring = FocusRing::new(1);
        assert_eq!(ring.shift(1), FocusTarget::Submit);
        ring.set_field_count(2);
        assert_eq!(ring.current(), FocusTarget::Submit);
    }

    #[test]
    fn empty_form_focuses_submit() {
        let mut ring = FocusRing::new(0);
        assert_eq!(ring.current(), FocusTarget::Submit);
        assert_eq!(ring.shift(-1), FocusTarget::Submit);
    }
}
