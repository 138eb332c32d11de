// Subscribes a SpinController to a map's events and forwards its steps
use super::spin::SpinController;
use crate::map_view::{MapEvents, MapView, SubscriptionId};
use crate::model::{MapEvent, SpinPhase};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub struct SpinBinding<V: MapView + MapEvents + 'static> {
    view: Rc<V>,
    controller: Rc<RefCell<SpinController>>,
    subscriptions: Vec<SubscriptionId>,
}

impl<V: MapView + MapEvents + 'static> SpinBinding<V> {
    /// `on_phase` is told about every phase change.
    pub fn attach(
        view: Rc<V>,
        controller: SpinController,
        on_phase: impl Fn(SpinPhase) + 'static,
    ) -> Self {
        let controller = Rc::new(RefCell::new(controller));
        let on_phase: Rc<dyn Fn(SpinPhase)> = Rc::new(on_phase);
        let subscriptions = MapEvent::ALL
            .iter()
            .map(|&event| {
                // handlers live inside the view, a strong ref would be a cycle
                let weak: Weak<V> = Rc::downgrade(&view);
                let controller = controller.clone();
                let on_phase = on_phase.clone();
                view.subscribe(
                    event,
                    Box::new(move || {
                        let Some(view) = weak.upgrade() else { return };
                        let zoom = view.zoom();
                        let center = view.center();
                        // release the controller before easing, the map may emit events synchronously
                        let (step, before, after) = {
                            let mut c = controller.borrow_mut();
                            let before = c.phase();
                            let step = c.handle(event.trigger(), zoom, center);
                            (step, before, c.phase())
                        };
                        if before != after {
                            log::debug!("spin phase {before:?} -> {after:?} on {}", event.js_name());
                            on_phase(after);
                        }
                        if let Some(req) = step {
                            view.ease_to(&req);
                        }
                    }),
                )
            })
            .collect();
        Self {
            view,
            controller,
            subscriptions,
        }
    }

    pub fn controller(&self) -> Rc<RefCell<SpinController>> {
        self.controller.clone()
    }

    /// Removes every subscription. Safe to call more than once.
    pub fn detach(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.view.unsubscribe(id);
        }
    }
}

impl<V: MapView + MapEvents + 'static> Drop for SpinBinding<V> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_view::recording::RecordingMap;
    use crate::model::LngLat;

    fn setup(zoom: f64) -> (Rc<RecordingMap>, SpinBinding<RecordingMap>, Rc<RefCell<Vec<SpinPhase>>>) {
        let map = Rc::new(RecordingMap::new(zoom, LngLat::new(0.0, 20.0)));
        let phases = Rc::new(RefCell::new(Vec::new()));
        let sink = phases.clone();
        let binding = SpinBinding::attach(map.clone(), SpinController::default(), move |p| {
            sink.borrow_mut().push(p)
        });
        (map, binding, phases)
    }

    #[test]
    fn style_load_starts_exactly_one_step() {
        let (map, _binding, phases) = setup(2.0);
        assert!(map.eases().is_empty());
        map.fire(MapEvent::StyleLoad);
        let eases = map.eases();
        assert_eq!(eases.len(), 1);
        assert_eq!(eases[0].center, LngLat::new(-2.0, 20.0));
        assert_eq!(eases[0].duration_ms, 1000);
        assert_eq!(*phases.borrow(), vec![SpinPhase::Spinning]);
    }

    #[test]
    fn move_end_keeps_the_globe_turning() {
        let (map, _binding, _) = setup(2.0);
        map.fire(MapEvent::StyleLoad);
        for _ in 0..3 {
            map.finish_ease();
        }
        let lngs: Vec<f64> = map.eases().iter().map(|e| e.center.lng).collect();
        assert_eq!(lngs, vec![-2.0, -4.0, -6.0, -8.0]);
    }

    #[test]
    fn mousedown_mid_spin_stops_after_in_flight_step() {
        let (map, _binding, phases) = setup(2.0);
        map.fire(MapEvent::StyleLoad);
        map.fire(MapEvent::MouseDown);
        map.finish_ease();
        map.fire(MapEvent::MoveEnd);
        assert_eq!(map.eases().len(), 1);

        map.fire(MapEvent::DragEnd);
        assert_eq!(map.eases().len(), 2);
        assert_eq!(
            *phases.borrow(),
            vec![SpinPhase::Spinning, SpinPhase::Interacting, SpinPhase::Spinning]
        );
    }

    #[test]
    fn every_gesture_end_resumes() {
        for end in [MapEvent::MouseUp, MapEvent::DragEnd, MapEvent::PitchEnd, MapEvent::RotateEnd] {
            let (map, _binding, _) = setup(2.0);
            map.fire(MapEvent::StyleLoad);
            map.fire(MapEvent::MouseDown);
            map.fire(end);
            assert_eq!(map.eases().len(), 2, "{end:?} did not resume spinning");
        }
    }

    #[test]
    fn zooming_in_past_threshold_stops_spin() {
        let (map, _binding, phases) = setup(2.0);
        map.fire(MapEvent::StyleLoad);
        map.set_zoom(4.0);
        map.finish_ease();
        assert_eq!(map.eases().len(), 1);
        assert_eq!(*phases.borrow(), vec![SpinPhase::Spinning, SpinPhase::Stopped]);
    }

    #[test]
    fn zoomed_in_at_startup_stays_still() {
        let (map, binding, phases) = setup(5.0);
        map.fire(MapEvent::StyleLoad);
        assert!(map.eases().is_empty());
        assert_eq!(binding.controller().borrow().phase(), SpinPhase::Stopped);
        assert_eq!(*phases.borrow(), vec![SpinPhase::Stopped]);
    }

    #[test]
    fn nothing_happens_before_style_load() {
        let (map, binding, phases) = setup(2.0);
        map.fire(MapEvent::MouseDown);
        map.fire(MapEvent::MouseUp);
        map.fire(MapEvent::MoveEnd);
        assert!(map.eases().is_empty());
        assert!(phases.borrow().is_empty());
        assert_eq!(binding.controller().borrow().phase(), SpinPhase::Waiting);
    }

    #[test]
    fn style_reload_does_not_double_the_loop() {
        let (map, _binding, _) = setup(2.0);
        map.fire(MapEvent::StyleLoad);
        map.fire(MapEvent::StyleLoad);
        assert_eq!(map.eases().len(), 1);
    }

    #[test]
    fn drop_unsubscribes_everything() {
        let (map, binding, _) = setup(2.0);
        assert_eq!(map.handler_count(), MapEvent::ALL.len());
        drop(binding);
        assert_eq!(map.handler_count(), 0);
        map.fire(MapEvent::StyleLoad);
        assert!(map.eases().is_empty());
    }

    #[test]
    fn detach_twice_is_harmless() {
        let (map, mut binding, _) = setup(2.0);
        binding.detach();
        binding.detach();
        assert_eq!(map.handler_count(), 0);
    }
}
