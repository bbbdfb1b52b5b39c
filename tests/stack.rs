use contig::{Stack, Vector};

#[test]
fn test_new() {
    let stack = Stack::<u32>::new();
    assert_eq!(stack.len(), 0);
    assert!(stack.is_empty());
    assert_eq!(stack.top(), None);
}

#[test]
fn test_push_pop_lifo() {
    let mut stack = Stack::new();
    stack.push(1);
    stack.push(2);
    stack.push(3);
    assert_eq!(stack.len(), 3);
    assert_eq!(stack.pop(), Some(3));
    assert_eq!(stack.pop(), Some(2));
    assert_eq!(stack.pop(), Some(1));
    assert_eq!(stack.pop(), None);
}

#[test]
fn test_top() {
    let mut stack = Stack::new();
    stack.push(10);
    stack.push(20);
    assert_eq!(stack.top(), Some(&20));
    *stack.top_mut().unwrap() = 25;
    assert_eq!(stack.pop(), Some(25));
    assert_eq!(stack.top(), Some(&10));
}

#[test]
fn test_try_push() {
    let mut stack = Stack::new();
    assert!(stack.try_push(7).is_ok());
    assert_eq!(stack.top(), Some(&7));
}

#[test]
fn test_swap() {
    let mut a = Stack::from(Vector::<i32>::from_slice(&[1, 2, 3]));
    let mut b = Stack::from(Vector::<i32>::from_slice(&[9]));
    a.swap(&mut b);
    assert_eq!(a.pop(), Some(9));
    assert_eq!(a.pop(), None);
    assert_eq!(b.pop(), Some(3));
    assert_eq!(b.len(), 2);
}

#[test]
fn test_with_container() {
    // the back of the container becomes the top of the stack
    let mut stack = Stack::with_container(Vector::<i32>::from_slice(&[1, 2, 3]));
    assert_eq!(stack.pop(), Some(3));
    let inner = stack.into_inner();
    assert_eq!(inner, [1, 2]);
}

#[test]
fn test_extend_from_iter() {
    let mut stack = [1, 2].into_iter().collect::<Stack<u32>>();
    stack.extend([3, 4]);
    assert_eq!(stack.pop(), Some(4));
    assert_eq!(stack.pop(), Some(3));
    assert_eq!(stack.pop(), Some(2));
}

#[test]
fn test_eq_ord() {
    let a = [1, 2, 3].into_iter().collect::<Stack<u32>>();
    let b = a.clone();
    assert_eq!(a, b);
    let c = [1, 2, 4].into_iter().collect::<Stack<u32>>();
    assert_ne!(a, c);
    assert!(a < c);
}

#[test]
fn test_default() {
    let stack = Stack::<u32>::default();
    assert!(stack.is_empty());
}
