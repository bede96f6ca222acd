use std::rc::Rc;

use crate::class::{LoxClass, LoxInstance};
use crate::error::LoxError;
use crate::function::LoxFunction;

/// Runtime value.  Callables and instances are shared by reference; two
/// clones of the same function or instance compare equal by identity.
#[derive(Debug, Clone)]
pub enum Value {
    NativeFunction {
        name: String,
        arity: usize,
        func: fn(&[Value]) -> Result<Value, LoxError>,
    },
    Function(Rc<LoxFunction>),
    Class(Rc<LoxClass>),
    Instance(Rc<LoxInstance>),
    Number(f64),
    String(String),
    Bool(bool),
    Nil,
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::NativeFunction { .. } => write!(f, "<native fn>"),

            Value::Function(function) => write!(f, "<fn {}>", function.name()),

            Value::Class(class) => write!(f, "{}", class.name),

            Value::Instance(instance) => write!(f, "{} instance", instance.class_name()),

            Value::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }

            Value::String(s) => write!(f, "{}", s),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Nil => write!(f, "nil"),
        }
    }
}
