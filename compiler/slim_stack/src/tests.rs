use super::*;

/// Right-nested chain, the shape query predicates usually take.
enum Chain {
    Leaf,
    Link(Box<Chain>),
}

fn build_chain(depth: usize) -> Chain {
    let mut chain = Chain::Leaf;
    for _ in 0..depth {
        chain = Chain::Link(Box::new(chain));
    }
    chain
}

fn measure(chain: &Chain) -> usize {
    ensure_sufficient_stack(|| match chain {
        Chain::Leaf => 0,
        Chain::Link(next) => measure(next) + 1,
    })
}

#[test]
fn test_shallow_chain() {
    assert_eq!(measure(&build_chain(16)), 16);
}

#[test]
fn test_deep_chain() {
    // Would overflow a default 8MB stack without growth.
    let chain = build_chain(200_000);
    assert_eq!(measure(&chain), 200_000);

    // Dropping a deep Box chain recurses too; unlink it iteratively.
    let mut current = chain;
    while let Chain::Link(next) = current {
        current = *next;
    }
}

#[test]
fn test_returns_closure_result() {
    assert_eq!(ensure_sufficient_stack(|| 42), 42);
}

#[test]
fn test_works_with_result_type() {
    let result: Result<i32, &str> = ensure_sufficient_stack(|| Err("boom"));
    assert_eq!(result, Err("boom"));
}
