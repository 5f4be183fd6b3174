use beans::Container;
use std::{sync::Arc, thread};

trait Worker: Send + Sync {
    fn id(&self) -> usize;
}

struct NumberedWorker(usize);

impl Worker for NumberedWorker {
    fn id(&self) -> usize {
        self.0
    }
}

beans::declare_interface!(dyn Worker);

const ROOT_ID: usize = usize::MAX;

#[test]
fn test_scopes_are_serialized_across_threads() {
    let container = Arc::new(Container::new());
    container.register_instance::<dyn Worker>(Arc::new(NumberedWorker(ROOT_ID)));

    let writers = (0..8).map(|id| {
        let container = container.clone();
        thread::spawn(move || {
            for _ in 0..50 {
                let _scope = container.enter_scope();
                container.register_factory::<dyn Worker, _>(move || Box::new(NumberedWorker(id)));
                assert_eq!(container.resolve::<dyn Worker>().unwrap().id(), id);
                assert_eq!(container.depth(), 1);
            }
        })
    });
    let readers = (0..4).map(|_| {
        let container = container.clone();
        thread::spawn(move || {
            for _ in 0..100 {
                // Scoped bindings are only visible to the thread holding the scope
                assert_eq!(container.resolve::<dyn Worker>().unwrap().id(), ROOT_ID);
            }
        })
    });

    let handles: Vec<_> = writers.chain(readers).collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(container.depth(), 0);
    assert_eq!(container.resolve::<dyn Worker>().unwrap().id(), ROOT_ID);
}

#[test]
fn test_unlocked_scope_is_visible_to_other_threads() {
    let container = Arc::new(Container::new());
    container.register_instance::<dyn Worker>(Arc::new(NumberedWorker(ROOT_ID)));

    let mut scope = container.enter_scope();
    container.register_instance::<dyn Worker>(Arc::new(NumberedWorker(1)));
    scope.unlock();

    let seen = thread::spawn({
        let container = container.clone();
        move || container.resolve::<dyn Worker>().unwrap().id()
    })
    .join()
    .unwrap();
    assert_eq!(seen, 1);

    scope.leave();
    assert_eq!(container.resolve::<dyn Worker>().unwrap().id(), ROOT_ID);
}
