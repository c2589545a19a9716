//! Every in-place operator against every kind of operand, checked against plain `u8` arithmetic.
use pixel_views::{ConcatenatedView, Operand, Plane, StridedView};
use pretty_assertions::assert_eq;

const LENGTHS: [usize; 4] = [3, 0, 2, 4];

fn lhs_values() -> Vec<u8> {
    (0..9u8).map(|i| 100u8.wrapping_add(i.wrapping_mul(37))).collect()
}

/// Never zero, so that division and modulo are defined everywhere.
fn rhs_values() -> Vec<u8> {
    (0..9u8).map(|i| i * 3 + 1).collect()
}

fn split(values: &[u8], lengths: &[usize]) -> ConcatenatedView<'static, u8> {
    let mut rest = values;
    let arrays = lengths
        .iter()
        .map(|len| {
            let (head, tail) = rest.split_at(*len);
            rest = tail;
            StridedView::owned(head.to_vec())
        })
        .collect();
    ConcatenatedView::new(arrays).unwrap()
}

struct OperatorCase {
    apply: fn(&ConcatenatedView<'static, u8>, Operand<'_, 'static, u8>),
    model: fn(u8, u8) -> u8,
}

impl OperatorCase {
    fn expected(&self, rhs: &[u8]) -> Vec<u8> {
        lhs_values()
            .into_iter()
            .zip(rhs.iter())
            .map(|(l, r)| (self.model)(l, *r))
            .collect()
    }

    fn run_scalar(&self) {
        let view = split(&lhs_values(), &LENGTHS);
        (self.apply)(&view, Operand::Scalar(7));
        assert_eq!(view.to_vec(), self.expected(&[7; 9]));
    }

    fn run_flat(&self) {
        let view = split(&lhs_values(), &LENGTHS);
        let rhs = rhs_values();
        (self.apply)(&view, Operand::Flat(&rhs[..]));
        assert_eq!(view.to_vec(), self.expected(&rhs));
    }

    fn run_view(&self) {
        let view = split(&lhs_values(), &LENGTHS);
        // Deliberately shaped differently from the target.
        let rhs = split(&rhs_values(), &[1, 5, 0, 3]);
        (self.apply)(&view, Operand::View(&rhs));
        assert_eq!(view.to_vec(), self.expected(&rhs_values()));
    }
}

macro_rules! operator_tests {
    ($op: ident, $model: expr) => {
        paste::paste! {
            const [<$op:upper _CASE>]: OperatorCase = OperatorCase {
                apply: |view, rhs| view.$op(rhs).unwrap(),
                model: $model,
            };

            #[test]
            fn [<test_ $op _scalar>]() {
                [<$op:upper _CASE>].run_scalar();
            }

            #[test]
            fn [<test_ $op _flat>]() {
                [<$op:upper _CASE>].run_flat();
            }

            #[test]
            fn [<test_ $op _view>]() {
                [<$op:upper _CASE>].run_view();
            }
        }
    };
}

operator_tests!(assign, |_, r| r);
operator_tests!(add, |l, r| l.wrapping_add(r));
operator_tests!(subtract, |l, r| l.wrapping_sub(r));
operator_tests!(multiply, |l, r| l.wrapping_mul(r));
operator_tests!(divide, |l, r| l / r);
operator_tests!(modulo, |l, r| l % r);
