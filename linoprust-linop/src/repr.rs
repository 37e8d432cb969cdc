use crate::operator::LinearOperator;
use std::fmt;

impl LinearOperator {
    fn fmt_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = self.shape().iter().map(|d| d.to_string()).collect();
        write!(
            f,
            "LinearOperator ({}) with shape ({}), dtype = {}, device = {}, implemented = {:?}",
            self.name(),
            dims.join(", "),
            self.dtype(),
            self.device(),
            self.implemented_primitives()
        )
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        self.fmt_header(f)?;
        let constituents = self.operator().constituents();
        if constituents.is_empty() {
            return Ok(());
        }
        f.write_str(" of:")?;
        for child in constituents {
            write!(f, "\n{}* ", "  ".repeat(depth + 1))?;
            child.fmt_nested(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for LinearOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, 0)
    }
}

impl fmt::Debug for LinearOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, 0)
    }
}
