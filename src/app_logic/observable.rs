/*
 * A minimal single-threaded observable value: a cell whose change
 * subscribers are invoked synchronously, in subscription order, every time
 * the value is replaced. Subscribers receive the old and the new value and
 * run to completion before `set` returns, which gives callers a strict
 * ordering guarantee over the effects of an assignment.
 *
 * Constraint: subscribers must not call `set` or `subscribe` on the cell
 * they observe. The cell lives on the UI event thread and is not `Send`.
 */
use std::cell::RefCell;

pub struct ObservableCell<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<Box<dyn FnMut(&T, &T)>>>,
}

impl<T> ObservableCell<T> {
    pub fn new(initial: T) -> Self {
        ObservableCell {
            value: RefCell::new(initial),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /*
     * Replaces the value and notifies every subscriber with the old and the
     * new value. Notification happens after the new value is stored, so a
     * subscriber reading the cell sees the new value.
     */
    pub fn set(&self, value: T) {
        let old = self.value.replace(value);
        let mut subscribers = self.subscribers.borrow_mut();
        let current = self.value.borrow();
        for subscriber in subscribers.iter_mut() {
            subscriber(&old, &current);
        }
    }

    /*
     * Registers a change subscriber. Subscribers fire on every subsequent
     * `set`, not on registration.
     */
    pub fn subscribe(&self, subscriber: impl FnMut(&T, &T) + 'static) {
        self.subscribers.borrow_mut().push(Box::new(subscriber));
    }

    // Runs `f` against the current value without cloning it.
    pub fn with_value<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }
}

impl<T: Clone> ObservableCell<T> {
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::ObservableCell;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribers_do_not_fire_on_registration() {
        let cell = ObservableCell::new(1);
        let fired = Rc::new(RefCell::new(0));
        let fired_clone = fired.clone();
        cell.subscribe(move |_, _| *fired_clone.borrow_mut() += 1);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn test_set_notifies_with_old_and_new() {
        let cell = ObservableCell::new("a".to_string());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        cell.subscribe(move |old: &String, new: &String| {
            seen_clone.borrow_mut().push((old.clone(), new.clone()));
        });

        cell.set("b".to_string());
        cell.set("c".to_string());

        assert_eq!(
            *seen.borrow(),
            vec![
                ("a".to_string(), "b".to_string()),
                ("b".to_string(), "c".to_string()),
            ]
        );
        assert_eq!(cell.get(), "c");
    }

    #[test]
    fn test_subscribers_run_in_subscription_order() {
        let cell = ObservableCell::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let order_a = order.clone();
        cell.subscribe(move |_, _| order_a.borrow_mut().push("first"));
        let order_b = order.clone();
        cell.subscribe(move |_, _| order_b.borrow_mut().push("second"));

        cell.set(1);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_subscriber_sees_stored_value_through_with_value() {
        let cell = Rc::new(ObservableCell::new(10));
        let cell_clone = cell.clone();
        let observed = Rc::new(RefCell::new(0));
        let observed_clone = observed.clone();
        cell.subscribe(move |_, _| {
            *observed_clone.borrow_mut() = cell_clone.with_value(|v| *v);
        });

        cell.set(42);
        assert_eq!(*observed.borrow(), 42);
    }
}
