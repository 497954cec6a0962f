use core::ops::{Add, Mul};

use super::{GroupVar, LinearCombination, ScalarVar, Term};

impl Mul<ScalarVar> for GroupVar {
    type Output = Term;

    /// Multiply a [`GroupVar`] by a [`ScalarVar`] to form a new [`Term`].
    fn mul(self, rhs: ScalarVar) -> Term {
        Term {
            elem: self,
            scalar: rhs,
        }
    }
}

impl Mul<GroupVar> for ScalarVar {
    type Output = Term;

    /// Multiply a [`ScalarVar`] by a [`GroupVar`] to form a new [`Term`].
    fn mul(self, rhs: GroupVar) -> Term {
        rhs * self
    }
}

impl Add for Term {
    type Output = LinearCombination;

    fn add(self, rhs: Term) -> LinearCombination {
        LinearCombination(vec![self, rhs])
    }
}

impl Add<Term> for LinearCombination {
    type Output = LinearCombination;

    fn add(mut self, rhs: Term) -> LinearCombination {
        self.0.push(rhs);
        self
    }
}

impl Add<LinearCombination> for Term {
    type Output = LinearCombination;

    fn add(self, rhs: LinearCombination) -> LinearCombination {
        let mut terms = vec![self];
        terms.extend(rhs.0);
        LinearCombination(terms)
    }
}
