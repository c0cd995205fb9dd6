use observable_collections::{cloned, listen, ChangeAction, ObservableDeque, ObservableVec};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn ergonomic_cloned_macro() {
    let mut list: ObservableVec<i32> = ObservableVec::new();
    let count = Rc::new(Cell::new(0));

    // Old way (painful)
    list.collection_changed().listen({
        let count = count.clone();
        move |_, _| {
            count.set(count.get() + 1);
            Ok(())
        }
    });

    // New way (ergonomic)
    list.collection_changed().listen(cloned!(count => move |_, _| {
        count.set(count.get() + 10);
        Ok(())
    }));

    list.append(1).unwrap();
    assert_eq!(count.get(), 11);
}

#[test]
fn ergonomic_listen_macro_returns_handle() {
    let mut deque: ObservableDeque<&str> = ObservableDeque::new();
    let actions = Rc::new(RefCell::new(Vec::new()));
    let lengths = Rc::new(RefCell::new(Vec::new()));

    // Capture multiple values
    let handler = listen!(deque, actions, lengths => move |deque, change| {
        actions.borrow_mut().push(change.action());
        lengths.borrow_mut().push(deque.len());
        Ok(())
    });

    deque.append("b").unwrap();
    deque.append_left("a").unwrap();
    deque.collection_changed().unsubscribe(&handler).unwrap();
    deque.clear().unwrap();

    assert_eq!(*actions.borrow(), vec![ChangeAction::Add, ChangeAction::Add]);
    assert_eq!(*lengths.borrow(), vec![1, 2]);
}

#[test]
fn ergonomic_listen_macro_without_captures() {
    let mut list: ObservableVec<u8> = ObservableVec::new();
    listen!(list, |list, _| {
        assert!(!list.is_empty());
        Ok(())
    });
    list.append(1).unwrap();
}
