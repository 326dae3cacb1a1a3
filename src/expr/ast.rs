use num_complex::Complex64;

/// Fonctions transcendantes autorisées dans une expression génératrice.
///
/// Liste fermée : l'évaluateur n'appelle jamais rien d'autre que ces
/// méthodes de `Complex64`. `log` est le logarithme naturel principal,
/// au sens numpy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Exp,
    Log,
    Sinh,
    Cosh,
    Tanh,
    Arcsin,
    Arccos,
    Arctan,
}

impl Func {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "exp" => Some(Func::Exp),
            "log" => Some(Func::Log),
            "sinh" => Some(Func::Sinh),
            "cosh" => Some(Func::Cosh),
            "tanh" => Some(Func::Tanh),
            "arcsin" => Some(Func::Arcsin),
            "arccos" => Some(Func::Arccos),
            "arctan" => Some(Func::Arctan),
            _ => None,
        }
    }

    #[allow(dead_code)]
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Exp => "exp",
            Func::Log => "log",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Tanh => "tanh",
            Func::Arcsin => "arcsin",
            Func::Arccos => "arccos",
            Func::Arctan => "arctan",
        }
    }

    fn apply(self, v: Complex64) -> Complex64 {
        match self {
            Func::Sin => v.sin(),
            Func::Cos => v.cos(),
            Func::Tan => v.tan(),
            Func::Exp => v.exp(),
            Func::Log => v.ln(),
            Func::Sinh => v.sinh(),
            Func::Cosh => v.cosh(),
            Func::Tanh => v.tanh(),
            Func::Arcsin => v.asin(),
            Func::Arccos => v.acos(),
            Func::Arctan => v.atan(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Arbre d'expression sur la variable complexe `z`.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Constant(Complex64),
    Z,
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        func: Func,
        arg: Box<Expr>,
    },
}

impl Expr {
    /// Évalue l'arbre en marchant dessus, sans aucune exécution de code
    /// générique : les seules opérations atteignables sont l'arithmétique
    /// complexe et la liste fermée de `Func`.
    pub fn eval(&self, z: Complex64) -> Complex64 {
        match self {
            Expr::Constant(c) => *c,
            Expr::Z => z,
            Expr::Neg(inner) => -inner.eval(z),
            Expr::Binary { op, lhs, rhs } => {
                let l = lhs.eval(z);
                let r = rhs.eval(z);
                match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                    BinaryOp::Pow => l.powc(r),
                }
            }
            Expr::Call { func, arg } => func.apply(arg.eval(z)),
        }
    }
}
