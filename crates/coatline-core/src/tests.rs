#[cfg(test)]
mod tests {
    use crate::animation::*;
    use crate::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use web_time::{Duration, Instant};

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_set_if_changed_skips_equal_values() {
        let sig = signal("hero");
        let calls = Rc::new(RefCell::new(Vec::new()));

        let c = calls.clone();
        sig.subscribe(move |v| c.borrow_mut().push(*v));

        assert!(!sig.set_if_changed("hero"));
        assert!(sig.set_if_changed("services"));
        assert!(!sig.set_if_changed("services"));
        assert_eq!(*calls.borrow(), vec!["services"]);
    }

    #[test]
    fn test_signal_watch_unsubscribes() {
        let sig = signal(0);
        let hits = Rc::new(RefCell::new(0));

        let h = hits.clone();
        let d = sig.watch(move |_| *h.borrow_mut() += 1);
        sig.set(1);
        d.run();
        sig.set(2);

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(sig.subscriber_count(), 0);
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(RefCell::new(false));

        let scope = Scope::new();
        let cleaned_up_clone = cleaned_up.clone();
        scope.add_disposer(move || {
            *cleaned_up_clone.borrow_mut() = true;
        });

        assert!(!*cleaned_up.borrow());
        scope.dispose();
        assert!(*cleaned_up.borrow());
        assert!(scope.is_disposed());
    }

    #[test]
    fn test_scope_drop_runs_disposers() {
        let cleaned_up = Rc::new(RefCell::new(false));
        {
            let scope = Scope::new();
            let c = cleaned_up.clone();
            scope.add_disposer(move || *c.borrow_mut() = true);
        }
        assert!(*cleaned_up.borrow());
    }

    #[test]
    fn test_scope_disposes_children_first_then_reverse_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let parent = Scope::new();
        let child = parent.child();

        let o = order.clone();
        parent.add_disposer(move || o.borrow_mut().push("parent-first"));
        let o = order.clone();
        parent.add_disposer(move || o.borrow_mut().push("parent-second"));
        let o = order.clone();
        child.add_disposer(move || o.borrow_mut().push("child"));

        parent.dispose();
        assert_eq!(
            *order.borrow(),
            vec!["child", "parent-second", "parent-first"]
        );
    }

    #[test]
    fn test_disposer_added_after_teardown_runs_immediately() {
        let scope = Scope::new();
        scope.dispose();
        let ran = Rc::new(RefCell::new(false));
        let r = ran.clone();
        scope.add_disposer(move || *r.borrow_mut() = true);
        assert!(*ran.borrow());
    }

    #[test]
    fn test_listeners_self_removal_during_emit() {
        let keys: Listeners<KeyEvent> = Listeners::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let slot: Rc<RefCell<Option<Dispose>>> = Rc::new(RefCell::new(None));
        let s = seen.clone();
        let slot2 = slot.clone();
        let d = keys.listen(move |ev| {
            s.borrow_mut().push(ev.key.clone());
            if let Some(d) = slot2.borrow().as_ref() {
                d.run();
            }
        });
        *slot.borrow_mut() = Some(d);

        keys.emit(&KeyEvent::new(Key::Escape));
        keys.emit(&KeyEvent::new(Key::Escape));
        assert_eq!(*seen.borrow(), vec![Key::Escape]);
        assert!(keys.is_empty());
    }

    #[test]
    fn test_frame_loop_hands_one_snapshot_to_all_callbacks() {
        let frames = FrameLoop::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s = seen.clone();
        let a = frames.on_frame(move |f| s.borrow_mut().push((f.frame, f.scroll_y)));
        let s = seen.clone();
        let _b = frames.on_frame(move |f| s.borrow_mut().push((f.frame, f.scroll_y)));

        frames.tick(320.0, Size { width: 1280.0, height: 800.0 });
        assert_eq!(*seen.borrow(), vec![(1, 320.0), (1, 320.0)]);

        a.run();
        frames.tick(400.0, Size { width: 1280.0, height: 800.0 });
        assert_eq!(seen.borrow().len(), 3);
        assert!(!frames.is_idle());
    }

    #[test]
    fn test_scroll_lock_nests() {
        let lock = ScrollLock::new();
        let g1 = lock.acquire("lightbox");
        let g2 = lock.acquire("menu");
        assert!(lock.is_locked());

        g1.release();
        assert!(lock.is_locked());
        assert!(lock.locked().get());

        drop(g2);
        assert!(!lock.is_locked());
        assert!(!lock.locked().get());
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));

        assert_eq!(Color::from_hex("#zz"), Color::BLACK);
        assert_eq!(Color(10, 20, 30, 255).to_css(), "rgba(10, 20, 30, 1)");
    }

    #[test]
    fn test_rect_visible_ratio() {
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let half_in = Rect::new(0.0, 400.0, 1000.0, 800.0);
        assert!((half_in.visible_ratio(&viewport) - 0.5).abs() < 1e-6);

        let below = Rect::new(0.0, 900.0, 1000.0, 100.0);
        assert_eq!(below.visible_ratio(&viewport), 0.0);

        let empty = Rect::new(0.0, 10.0, 1000.0, 0.0);
        assert_eq!(empty.visible_ratio(&viewport), 0.0);

        let pinned = Rect::new(0.0, -1500.0, 1000.0, 4000.0);
        assert_eq!(pinned.visible_ratio(&viewport), 1.0);
    }

    #[test]
    fn test_transform_css() {
        assert_eq!(Transform::identity().to_css(), "none");
        let t = Transform {
            translate_x: 0.0,
            translate_y: -40.0,
            scale: 1.1,
            rotate_deg: 0.0,
        };
        assert_eq!(t.to_css(), "translate3d(0px, -40px, 0) scale(1.1)");
    }

    #[test]
    fn test_swipe_direction() {
        assert_eq!(
            swipe_direction(Vec2::new(200.0, 0.0), Vec2::new(80.0, 10.0)),
            Some(SwipeDirection::Left)
        );
        assert_eq!(swipe_direction(Vec2::ZERO, Vec2::new(10.0, 5.0)), None);
        assert_eq!(Key::from_dom("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_dom("g"), Key::Character('g'));
    }

    #[test]
    fn test_animation_deterministic() {
        let t0 = Instant::now();
        set_clock(Box::new(TestClock { t: t0 }));

        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target(10.0);
        set_clock(Box::new(TestClock {
            t: t0 + Duration::from_millis(250),
        }));
        assert!(a.update());
        assert!((*a.get() - 2.5).abs() < 0.01);

        set_clock(Box::new(TestClock {
            t: t0 + Duration::from_millis(1000),
        }));
        let cont = a.update();
        assert!(!cont);
        assert!((*a.get() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_color_interpolate_midpoint() {
        let a = Color(0, 0, 0, 255);
        let b = Color(200, 100, 50, 255);
        assert_eq!(a.interpolate(&b, 0.5), Color(100, 50, 25, 255));
    }
}
