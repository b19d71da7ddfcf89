use super::*;

fn int(n: i32) -> Value {
    Value::integer(n)
}

#[test]
fn define_and_lookup() {
    let mut env = Environment::new();
    env.define("x", int(1), Mutability::Mutable);
    assert_eq!(env.lookup("x"), Some(int(1)));
    assert_eq!(env.lookup("y"), None);
}

#[test]
fn inner_scope_shadows_and_pops() {
    let mut env = Environment::new();
    env.define("x", int(1), Mutability::Mutable);
    env.push_scope();
    env.define("x", int(2), Mutability::Mutable);
    assert_eq!(env.lookup("x"), Some(int(2)));
    env.pop_scope();
    assert_eq!(env.lookup("x"), Some(int(1)));
}

#[test]
fn assign_reaches_outer_scope() {
    let mut env = Environment::new();
    env.define("x", int(1), Mutability::Mutable);
    env.push_scope();
    env.assign("x", int(5)).unwrap_or_else(|e| panic!("{e:?}"));
    env.pop_scope();
    assert_eq!(env.lookup("x"), Some(int(5)));
}

#[test]
fn assign_errors() {
    let mut env = Environment::new();
    env.define("x", int(1), Mutability::Immutable);
    assert_eq!(env.assign("x", int(2)), Err(AssignError::Immutable));
    assert_eq!(env.assign("y", int(2)), Err(AssignError::Undefined));
    assert_eq!(env.lookup("x"), Some(int(1)));
}

#[test]
fn root_is_never_popped() {
    let mut env = Environment::new();
    env.pop_scope();
    env.pop_scope();
    assert_eq!(env.depth(), 1);
    env.push_scope();
    assert_eq!(env.depth(), 2);
}

#[test]
fn enclosed_environment_sees_parent_but_writes_locally() {
    let mut global = Environment::new();
    global.define("g", int(1), Mutability::Mutable);

    let mut frame = Environment::enclosed(global.root_scope().clone());
    frame.define("local", int(2), Mutability::Immutable);
    frame.assign("g", int(3)).unwrap_or_else(|e| panic!("{e:?}"));

    assert_eq!(frame.lookup("local"), Some(int(2)));
    assert_eq!(global.lookup("g"), Some(int(3)));
    assert_eq!(global.lookup("local"), None);
}

#[test]
fn functions_are_keyed_by_arity() {
    let mut env = Environment::new();
    env.define_function("print", 1, Callable::Builtin(Builtin::Print));
    env.push_scope();
    assert!(matches!(
        env.lookup_function("print", 1),
        Some(Callable::Builtin(Builtin::Print))
    ));
    assert!(env.lookup_function("print", 0).is_none());
    assert!(env.lookup_function("main", 0).is_none());
}

#[test]
fn clear_drops_bindings() {
    let env = Environment::new();
    let root = env.root_scope();
    root.borrow_mut().define("x", int(1), Mutability::Mutable);
    root.borrow_mut().define_function("print", 1, Callable::Builtin(Builtin::Print));
    root.borrow_mut().clear();
    assert_eq!(env.lookup("x"), None);
    assert!(env.lookup_function("print", 1).is_none());
}
