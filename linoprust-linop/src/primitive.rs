use std::fmt;

/// One of the four minimal operator actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Forward apply to a vector: `A x`.
    Mv,
    /// Adjoint apply to a vector: `A^H x`.
    Rmv,
    /// Forward apply to a matrix: `A X`.
    Mm,
    /// Adjoint apply to a matrix: `A^H X`.
    Rmm,
}

impl Primitive {
    /// All primitives, ordered so that every derivation source precedes its target.
    pub const ALL: [Primitive; 4] = [Primitive::Mv, Primitive::Rmv, Primitive::Mm, Primitive::Rmm];

    pub(crate) fn index(self) -> usize {
        match self {
            Primitive::Mv => 0,
            Primitive::Rmv => 1,
            Primitive::Mm => 2,
            Primitive::Rmm => 3,
        }
    }

    /// Name of the public method on `LinearOperator`.
    pub fn method_name(self) -> &'static str {
        match self {
            Primitive::Mv => "mv",
            Primitive::Rmv => "rmv",
            Primitive::Mm => "mm",
            Primitive::Rmm => "rmm",
        }
    }

    /// Name of the `Operator` hook a concrete operator overrides.
    pub fn hook_name(self) -> &'static str {
        match self {
            Primitive::Mv => "mv_impl",
            Primitive::Rmv => "rmv_impl",
            Primitive::Mm => "mm_impl",
            Primitive::Rmm => "rmm_impl",
        }
    }

    pub fn is_adjoint(self) -> bool {
        matches!(self, Primitive::Rmv | Primitive::Rmm)
    }

    /// Whether the operand carries a trailing column dimension.
    pub fn is_matrix(self) -> bool {
        matches!(self, Primitive::Mm | Primitive::Rmm)
    }

    /// The same action through the adjoint (`mv <-> rmv`, `mm <-> rmm`).
    pub fn adjoint(self) -> Primitive {
        match self {
            Primitive::Mv => Primitive::Rmv,
            Primitive::Rmv => Primitive::Mv,
            Primitive::Mm => Primitive::Rmm,
            Primitive::Rmm => Primitive::Mm,
        }
    }

    /// The vector primitive a matrix primitive reduces to column by column.
    pub fn vector_form(self) -> Primitive {
        match self {
            Primitive::Mm => Primitive::Mv,
            Primitive::Rmm => Primitive::Rmv,
            vector => vector,
        }
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

/// A set of primitives, stored as a bitset.
///
/// Concrete operators return one from `Operator::capabilities` to declare which hooks
/// they override.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Capabilities = Capabilities(0);
    pub const ALL: Capabilities = Capabilities(0b1111);

    pub fn from_primitives(primitives: &[Primitive]) -> Self {
        primitives.iter().copied().collect()
    }

    #[must_use]
    pub fn with(self, primitive: Primitive) -> Self {
        Capabilities(self.0 | primitive.bit())
    }

    pub fn contains(self, primitive: Primitive) -> bool {
        self.0 & primitive.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Primitive> {
        Primitive::ALL.into_iter().filter(move |p| self.contains(*p))
    }

    /// Forward and adjoint primitives exchanged, as seen through an adjoint view.
    #[must_use]
    pub fn swapped(self) -> Self {
        self.iter().map(Primitive::adjoint).collect()
    }
}

impl FromIterator<Primitive> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Self {
        iter.into_iter().fold(Capabilities::NONE, Capabilities::with)
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Primitive::method_name).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
