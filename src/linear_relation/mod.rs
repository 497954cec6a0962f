//! # Linear maps and relations over prime-order groups.
//!
//! This module provides the statement builder for proofs of linear group
//! relations (discrete logarithms, DLEQ, Pedersen openings and friends):
//!
//! - [`LinearCombination`]: a sparse sum of `scalar * element` terms.
//! - [`LinearMap`]: a list of linear combinations acting on group elements,
//!   i.e. a group homomorphism from scalar vectors to element vectors.
//! - [`LinearRelation`]: the builder managing variable allocation, element
//!   assignment and equations, finalized into an [`Instance`].

use crate::errors::Error;
use crate::group::Group;

mod instance;
/// Operator sugar for building terms and combinations from variables.
mod ops;

pub use instance::Instance;

/// A wrapper representing an index for a scalar variable.
///
/// Used to reference scalars in sparse linear combinations.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct ScalarVar(usize);

impl ScalarVar {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A wrapper representing an index for a group element variable.
///
/// Used to reference group elements in sparse linear combinations.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct GroupVar(usize);

impl GroupVar {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A term in a linear combination, representing `scalar * elem`.
#[derive(Copy, Clone, Debug)]
pub struct Term {
    scalar: ScalarVar,
    elem: GroupVar,
}

impl Term {
    pub fn scalar(&self) -> ScalarVar {
        self.scalar
    }

    pub fn elem(&self) -> GroupVar {
        self.elem
    }
}

impl From<(ScalarVar, GroupVar)> for Term {
    fn from((scalar, elem): (ScalarVar, GroupVar)) -> Self {
        Self { scalar, elem }
    }
}

/// A sparse linear combination of scalar and group element variables,
/// representing `s_1 * P_1 + s_2 * P_2 + ... + s_n * P_n`.
///
/// The indices refer to the variable tables managed by the containing
/// [`LinearRelation`].
#[derive(Clone, Debug)]
pub struct LinearCombination(Vec<Term>);

impl LinearCombination {
    pub fn terms(&self) -> &[Term] {
        &self.0
    }
}

impl<T: Into<Term>> From<T> for LinearCombination {
    fn from(term: T) -> Self {
        Self(vec![term.into()])
    }
}

impl<T: Into<Term>> From<Vec<T>> for LinearCombination {
    fn from(terms: Vec<T>) -> Self {
        Self(terms.into_iter().map(|x| x.into()).collect())
    }
}

impl<T: Into<Term>, const N: usize> From<[T; N]> for LinearCombination {
    fn from(terms: [T; N]) -> Self {
        Self(terms.into_iter().map(|x| x.into()).collect())
    }
}

impl<T: Into<Term>> FromIterator<T> for LinearCombination {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(|x| x.into()).collect())
    }
}

/// Ordered mapping of [`GroupVar`] to group element assignments.
#[derive(Clone, Debug)]
pub struct GroupMap<G>(Vec<Option<G>>);

impl<G: Group> GroupMap<G> {
    /// Assign a group element value to a point variable.
    ///
    /// # Panics
    ///
    /// Panics if the given assignment conflicts with an existing assignment.
    pub fn assign_element(&mut self, var: GroupVar, element: G) {
        if self.0.len() <= var.0 {
            self.0.resize(var.0 + 1, None);
        } else if let Some(assignment) = &self.0[var.0] {
            assert!(
                *assignment == element,
                "conflicting assignments for var {var:?}"
            );
        }
        self.0[var.0] = Some(element);
    }

    /// Assign a collection of `(GroupVar, element)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if the collection contains two conflicting assignments for the
    /// same variable.
    pub fn assign_elements(&mut self, assignments: impl IntoIterator<Item = (GroupVar, G)>) {
        for (var, elem) in assignments.into_iter() {
            self.assign_element(var, elem);
        }
    }

    /// Get the element value assigned to the given point var.
    ///
    /// Returns [`Error::UnassignedGroupVar`] if a value is not assigned.
    pub fn get(&self, var: GroupVar) -> Result<G, Error> {
        self.0
            .get(var.0)
            .and_then(|slot| slot.clone())
            .ok_or(Error::UnassignedGroupVar { var })
    }

    /// Iterate over the assigned variable and element pairs in this mapping.
    pub fn iter(&self) -> impl Iterator<Item = (GroupVar, &G)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, opt)| opt.as_ref().map(|g| (GroupVar(i), g)))
    }
}

impl<G> Default for GroupMap<G> {
    fn default() -> Self {
        Self(Vec::default())
    }
}

impl<G: Group> FromIterator<(GroupVar, G)> for GroupMap<G> {
    fn from_iter<T: IntoIterator<Item = (GroupVar, G)>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), |mut map, (var, val)| {
            map.assign_element(var, val);
            map
        })
    }
}

/// A list of linear combinations over group elements: the sparse morphism
/// `φ(s) = (Σ s[scalar_idx] * E[element_idx], ...)`, one coordinate per
/// constraint.
#[derive(Clone, Default, Debug)]
pub struct LinearMap<G: Group> {
    /// The set of linear combination constraints (equations).
    pub constraints: Vec<LinearCombination>,
    /// Assignments of the group elements referenced by the morphism.
    pub group_elements: GroupMap<G>,
    /// The total number of scalar variables allocated.
    pub num_scalars: usize,
    /// The total number of group element variables allocated.
    pub num_elements: usize,
}

impl<G: Group> LinearMap<G> {
    /// Creates a new empty [`LinearMap`].
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            group_elements: GroupMap::default(),
            num_scalars: 0,
            num_elements: 0,
        }
    }

    /// Returns the number of constraints (equations) in this linear map.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Adds a new linear combination constraint to the morphism.
    pub fn append(&mut self, lc: LinearCombination) {
        self.constraints.push(lc);
    }

    /// Evaluates the morphism on the provided scalars.
    ///
    /// Returns one group element per constraint, or an error if the scalar
    /// count disagrees with the allocation or a referenced element variable
    /// is unassigned.
    pub fn evaluate(&self, scalars: &[G::Scalar]) -> Result<Vec<G>, Error> {
        if scalars.len() != self.num_scalars {
            return Err(Error::InvalidInstanceWitnessPair);
        }
        self.constraints
            .iter()
            .map(|lc| {
                let coefficients = lc
                    .terms()
                    .iter()
                    .map(|term| scalars[term.scalar.0].clone())
                    .collect::<Vec<_>>();
                let elements = lc
                    .terms()
                    .iter()
                    .map(|term| self.group_elements.get(term.elem))
                    .collect::<Result<Vec<_>, Error>>()?;
                Ok(G::msm(&coefficients, &elements))
            })
            .collect()
    }
}

/// A builder coupling a [`LinearMap`] with the group variables holding the
/// expected image of each equation.
///
/// This is the mutable, declarative stage of a statement: callers allocate
/// variables, assign element values and append equations, then call
/// [`LinearRelation::instance`] to produce the immutable [`Instance`] that
/// protocols operate on.
#[derive(Clone, Default, Debug)]
pub struct LinearRelation<G: Group> {
    /// The underlying linear map describing the structure of the statement.
    pub linear_map: LinearMap<G>,
    /// Variables holding the "target" image for each constraint.
    pub image: Vec<GroupVar>,
}

impl<G: Group> LinearRelation<G> {
    /// Create a new empty [`LinearRelation`].
    pub fn new() -> Self {
        Self {
            linear_map: LinearMap::new(),
            image: Vec::new(),
        }
    }

    /// Adds a new equation to the statement of the form
    /// `lhs = Σ (scalar_i * point_i)`.
    pub fn append_equation(&mut self, lhs: GroupVar, rhs: impl Into<LinearCombination>) {
        self.linear_map.append(rhs.into());
        self.image.push(lhs);
    }

    /// Allocates a fresh image variable and appends `var = rhs` as an
    /// equation, returning the new variable.
    pub fn allocate_eq(&mut self, rhs: impl Into<LinearCombination>) -> GroupVar {
        let var = self.allocate_element();
        self.append_equation(var, rhs);
        var
    }

    /// Allocates a scalar variable for use in the morphism.
    pub fn allocate_scalar(&mut self) -> ScalarVar {
        self.linear_map.num_scalars += 1;
        ScalarVar(self.linear_map.num_scalars - 1)
    }

    /// Allocates `N` scalar variables.
    ///
    /// # Example
    /// ```
    /// # use sigma_proofs::LinearRelation;
    /// use sigma_proofs::group::p256::P256Point;
    ///
    /// let mut relation = LinearRelation::<P256Point>::new();
    /// let [var_x, var_y] = relation.allocate_scalars();
    /// ```
    pub fn allocate_scalars<const N: usize>(&mut self) -> [ScalarVar; N] {
        let mut vars = [ScalarVar(usize::MAX); N];
        for var in vars.iter_mut() {
            *var = self.allocate_scalar();
        }
        vars
    }

    /// Allocates a group element variable for use in the morphism.
    pub fn allocate_element(&mut self) -> GroupVar {
        self.linear_map.num_elements += 1;
        GroupVar(self.linear_map.num_elements - 1)
    }

    /// Allocates `N` group element variables.
    ///
    /// # Example
    /// ```
    /// # use sigma_proofs::LinearRelation;
    /// use sigma_proofs::group::p256::P256Point;
    ///
    /// let mut relation = LinearRelation::<P256Point>::new();
    /// let [var_g, var_h] = relation.allocate_elements();
    /// ```
    pub fn allocate_elements<const N: usize>(&mut self) -> [GroupVar; N] {
        let mut vars = [GroupVar(usize::MAX); N];
        for var in vars.iter_mut() {
            *var = self.allocate_element();
        }
        vars
    }

    /// Assign a group element value to a point variable.
    ///
    /// # Panics
    ///
    /// Panics if the given assignment conflicts with an existing assignment.
    pub fn set_element(&mut self, var: GroupVar, element: G) {
        self.linear_map.group_elements.assign_element(var, element)
    }

    /// Assign a collection of `(GroupVar, element)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if the collection contains two conflicting assignments for the
    /// same variable.
    pub fn set_elements(&mut self, assignments: impl IntoIterator<Item = (GroupVar, G)>) {
        self.linear_map.group_elements.assign_elements(assignments)
    }

    /// Evaluates the morphism on `scalars` and assigns each equation's
    /// left-hand variable to the result.
    ///
    /// After this call every image variable is assigned, which lets callers
    /// define a statement from its witness without computing the public
    /// values by hand.
    ///
    /// # Panics
    ///
    /// Panics if the relation has a different number of constraints and
    /// image variables.
    pub fn compute_image(&mut self, scalars: &[G::Scalar]) -> Result<(), Error> {
        assert_eq!(
            self.linear_map.num_constraints(),
            self.image.len(),
            "invalid LinearRelation: different number of constraints and image variables"
        );

        let values = self.linear_map.evaluate(scalars)?;
        for (lhs, value) in self.image.iter().zip(values) {
            self.linear_map.group_elements.assign_element(*lhs, value);
        }
        Ok(())
    }

    /// Returns the group elements currently assigned to the image variables.
    pub fn image(&self) -> Result<Vec<G>, Error> {
        self.image
            .iter()
            .map(|&var| self.linear_map.group_elements.get(var))
            .collect()
    }

    /// Finalize the builder into an immutable [`Instance`].
    ///
    /// Fails if any allocated element variable is unassigned, or the
    /// statement shape cannot be bound into a label.
    pub fn instance(&self) -> Result<Instance<G>, Error> {
        Instance::new(self.linear_map.clone(), self.image()?)
    }
}
