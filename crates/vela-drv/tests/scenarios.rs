//! The literal input/output scenarios a complete implementation must
//! reproduce verbatim on stdout.

use std::cell::RefCell;
use std::rc::Rc;

fn run(source: &str) -> String {
    let out = Rc::new(RefCell::new(Vec::new()));
    vela_drv::run_source(source, out.clone()).expect("program should evaluate without error");
    String::from_utf8(out.borrow().clone()).unwrap()
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(run("console.log(1 + 2 * 3);"), "7\n");
}

#[test]
fn function_call_and_return() {
    assert_eq!(run("function f(x){ return x*x; } console.log(f(5));"), "25\n");
}

#[test]
fn array_literal_and_indexing() {
    assert_eq!(run("const a = [1,2,3]; console.log(a[0], a[2]);"), "1 3\n");
}

#[test]
fn object_literal_and_member_access() {
    assert_eq!(run("let o = {x: 10, y: 20}; console.log(o.x + o.y);"), "30\n");
}

#[test]
fn closures_retain_independent_mutable_state() {
    let source = "function mk(){ let c = 0; return function(){ c = c + 1; return c; }; } \
                   let f = mk(); console.log(f(), f(), f());";
    assert_eq!(run(source), "1 2 3\n");
}

#[test]
fn json_stringify_of_nested_object() {
    assert_eq!(
        run("console.log(JSON.stringify({a:1,b:[2,3]}));"),
        "{\"a\":1,\"b\":[2,3]}\n"
    );
}
