//! Fixtures shared by the unit tests.

use std::sync::{Arc, Once};

use crate::{
    ConstructorInfoSlim, ExpressionSlim, MethodInfoSlim, ObjectSlim, ObjectValue,
    ParameterExpressionSlim, TypeSlim,
};

static TRACING_INIT: Once = Once::new();

/// Route `tracing` output to the test harness when `RUST_LOG` is set.
pub(crate) fn init_test_logging() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer())
                .with(EnvFilter::from_default_env())
                .try_init();
        }
    });
}

pub(crate) fn int() -> TypeSlim {
    TypeSlim::simple("Int32")
}

pub(crate) fn boolean() -> TypeSlim {
    TypeSlim::simple("Boolean")
}

pub(crate) fn param(name: &str) -> Arc<ParameterExpressionSlim> {
    ParameterExpressionSlim::named(int(), name)
}

pub(crate) fn int_const(value: i64) -> ExpressionSlim {
    ExpressionSlim::constant(ObjectSlim::new(int(), ObjectValue::Int(value)))
}

pub(crate) fn bool_const(value: bool) -> ExpressionSlim {
    ExpressionSlim::constant(ObjectSlim::new(boolean(), ObjectValue::Bool(value)))
}

/// `static Int32 Program.{name}(Int32 x arity)`.
pub(crate) fn static_method(name: &str, arity: usize) -> MethodInfoSlim {
    MethodInfoSlim::new(
        TypeSlim::simple("Program"),
        name,
        std::iter::repeat_with(int).take(arity),
        Some(int()),
    )
}

pub(crate) fn point_constructor() -> ConstructorInfoSlim {
    ConstructorInfoSlim::new(TypeSlim::simple("Point"), [int(), int()])
}
