use iced::mouse;
use iced::widget::canvas;
use iced::{Color, Element, Length, Point, Rectangle, Size};

use crate::core::capture_overlay::{CaptureJob, CaptureOverlay, OverlayState};
use crate::core::models::OverlayPoint;
use crate::global_constants::{OVERLAY_DIM_RGBA, OVERLAY_PEN_RGB, OVERLAY_PEN_WIDTH};

#[derive(Debug, Clone)]
pub enum CaptureOverlayViewMessage {
    PointerPressed(Point),
    PointerMoved(Point),
    PointerReleased(Option<Point>),
    CancelRequested,
}

/// What the owner of the overlay window has to do after an update.
#[derive(Debug)]
pub enum OverlayViewOutcome {
    KeepOpen,
    Dismiss(Option<CaptureJob>),
}

/// Full-screen canvas that draws the dim layer and the rubber-band outline.
pub struct CaptureOverlayView {
    overlay: CaptureOverlay,
}

impl CaptureOverlayView {
    pub fn build_with_overlay(overlay: CaptureOverlay) -> Self {
        log::debug!("[OVERLAY_VIEW] building view");
        Self { overlay }
    }

    pub fn update(&mut self, message: CaptureOverlayViewMessage) -> OverlayViewOutcome {
        match message {
            CaptureOverlayViewMessage::PointerPressed(position) => {
                self.overlay.on_pressed(Self::to_overlay_point(position));
                OverlayViewOutcome::KeepOpen
            }
            CaptureOverlayViewMessage::PointerMoved(position) => {
                self.overlay.on_moved(Self::to_overlay_point(position));
                OverlayViewOutcome::KeepOpen
            }
            CaptureOverlayViewMessage::PointerReleased(position) => {
                let point = position
                    .map(Self::to_overlay_point)
                    .or(self.overlay.last_pointer())
                    .unwrap_or(OverlayPoint::new(0, 0));
                let job = self.overlay.on_released(point);
                self.overlay.close();
                OverlayViewOutcome::Dismiss(job)
            }
            CaptureOverlayViewMessage::CancelRequested => {
                log::info!("[OVERLAY_VIEW] selection cancelled with Escape");
                self.overlay.close();
                OverlayViewOutcome::Dismiss(None)
            }
        }
    }

    /// Ends the session without a capture, e.g. when the window is closed
    /// by the window manager.
    pub fn abandon(&mut self) {
        self.overlay.close();
    }

    pub fn overlay_state(&self) -> OverlayState {
        self.overlay.state()
    }

    pub fn render_ui(&self) -> Element<'_, CaptureOverlayViewMessage> {
        canvas(self).width(Length::Fill).height(Length::Fill).into()
    }

    fn to_overlay_point(position: Point) -> OverlayPoint {
        OverlayPoint::from_logical(position.x, position.y)
    }
}

impl canvas::Program<CaptureOverlayViewMessage> for CaptureOverlayView {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        _bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<CaptureOverlayViewMessage>> {
        match event {
            iced::Event::Mouse(mouse_event) => match mouse_event {
                mouse::Event::ButtonPressed(mouse::Button::Left) => cursor
                    .position()
                    .map(|position| {
                        canvas::Action::publish(CaptureOverlayViewMessage::PointerPressed(position))
                    }),
                mouse::Event::CursorMoved { position } => Some(canvas::Action::publish(
                    CaptureOverlayViewMessage::PointerMoved(*position),
                )),
                mouse::Event::ButtonReleased(mouse::Button::Left) => Some(canvas::Action::publish(
                    CaptureOverlayViewMessage::PointerReleased(cursor.position()),
                )),
                _ => None,
            },
            iced::Event::Keyboard(iced::keyboard::Event::KeyPressed {
                key: iced::keyboard::Key::Named(iced::keyboard::key::Named::Escape),
                ..
            }) => Some(canvas::Action::publish(
                CaptureOverlayViewMessage::CancelRequested,
            )),
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry<iced::Renderer>> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let (r, g, b, a) = OVERLAY_DIM_RGBA;
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::from_rgba(r, g, b, a));

        if let Some(outline) = self.overlay.selection_outline() {
            let (r, g, b) = OVERLAY_PEN_RGB;
            let selection_path = canvas::Path::rectangle(
                Point::new(outline.left() as f32, outline.top() as f32),
                Size::new(outline.width() as f32, outline.height() as f32),
            );
            frame.stroke(
                &selection_path,
                canvas::Stroke::default()
                    .with_color(Color::from_rgb8(r, g, b))
                    .with_width(OVERLAY_PEN_WIDTH),
            );
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        mouse::Interaction::Crosshair
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ScreenOffset;
    use futures::executor::block_on;

    fn open_view() -> (CaptureOverlayView, crate::core::capture_overlay::CaptureCompletion) {
        let (overlay, completion) = CaptureOverlay::open(ScreenOffset::new(100, 0));
        (CaptureOverlayView::build_with_overlay(overlay), completion)
    }

    #[test]
    fn test_drag_produces_job_in_global_coordinates() {
        let (mut view, _completion) = open_view();

        view.update(CaptureOverlayViewMessage::PointerPressed(Point::new(10.0, 10.0)));
        view.update(CaptureOverlayViewMessage::PointerMoved(Point::new(40.0, 30.0)));
        let outcome = view.update(CaptureOverlayViewMessage::PointerReleased(Some(Point::new(50.0, 60.0))));

        let OverlayViewOutcome::Dismiss(Some(job)) = outcome else {
            panic!("expected a capture job");
        };
        assert_eq!(job.region().left(), 110);
        assert_eq!(job.region().right(), 150);
        assert_eq!(job.region().bottom(), 60);
        assert_eq!(view.overlay_state(), OverlayState::Closed);
    }

    #[test]
    fn test_release_without_position_uses_last_pointer() {
        let (mut view, _completion) = open_view();

        view.update(CaptureOverlayViewMessage::PointerPressed(Point::new(0.0, 0.0)));
        view.update(CaptureOverlayViewMessage::PointerMoved(Point::new(20.0, 15.0)));
        let outcome = view.update(CaptureOverlayViewMessage::PointerReleased(None));

        let OverlayViewOutcome::Dismiss(Some(job)) = outcome else {
            panic!("expected a capture job");
        };
        assert_eq!((job.region().width(), job.region().height()), (20, 15));
    }

    #[test]
    fn test_escape_dismisses_without_result() {
        let (mut view, completion) = open_view();

        view.update(CaptureOverlayViewMessage::PointerPressed(Point::new(5.0, 5.0)));
        let outcome = view.update(CaptureOverlayViewMessage::CancelRequested);

        assert!(matches!(outcome, OverlayViewOutcome::Dismiss(None)));
        assert!(block_on(completion.wait()).is_none());
    }

    #[test]
    fn test_abandon_resolves_completion_to_none() {
        let (mut view, completion) = open_view();

        view.abandon();

        assert_eq!(view.overlay_state(), OverlayState::Closed);
        assert!(block_on(completion.wait()).is_none());
    }
}
