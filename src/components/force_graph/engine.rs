use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent, Window,
};

use super::render;
use super::state::{ForceGraphState, TICK};
use crate::engines::js_error_message;
use crate::graph::{EngineKind, MountRequest, RenderEngine, RenderError, ViewHandle};

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type PointerHandler = fn(&mut ForceGraphState, f64, f64);

/// Force simulation on a `<canvas>` appended to the container. Needs no
/// external script, so it is available whenever a window is.
pub struct CanvasEngine;

fn fail(err: JsValue) -> RenderError {
	RenderError::construction(EngineKind::Canvas, js_error_message(&err))
}

fn missing(what: &str) -> RenderError {
	RenderError::construction(EngineKind::Canvas, format!("{what} unavailable"))
}

fn container_size(container: &HtmlElement) -> (f64, f64) {
	let (w, h) = (container.client_width(), container.client_height());
	if w > 0 && h > 0 {
		(w as f64, h as f64)
	} else {
		FALLBACK_SIZE
	}
}

fn local_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

impl RenderEngine<HtmlElement> for CanvasEngine {
	fn kind(&self) -> EngineKind {
		EngineKind::Canvas
	}

	fn is_available(&self) -> bool {
		web_sys::window().is_some()
	}

	fn mount(
		&self,
		container: &HtmlElement,
		request: MountRequest<'_>,
	) -> Result<Box<dyn ViewHandle>, RenderError> {
		let window: Window = web_sys::window().ok_or_else(|| missing("window"))?;
		let document = window.document().ok_or_else(|| missing("document"))?;

		let (w, h) = container_size(container);
		let mut state = ForceGraphState::new(
			request.dataset,
			request.styles,
			request.layout,
			request.interaction,
			w,
			h,
		)?;
		state.warm_up(request.layout.iterations);
		debug!(
			"Canvas simulation ready: {} nodes, {} edges",
			state.node_count(),
			state.edge_count()
		);

		let canvas: HtmlCanvasElement = document
			.create_element("canvas")
			.map_err(fail)?
			.dyn_into()
			.map_err(|_| missing("canvas element"))?;
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		canvas.set_class_name("force-graph-canvas");
		canvas
			.set_attribute("style", "display: block; cursor: grab;")
			.map_err(fail)?;
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.map_err(fail)?
			.ok_or_else(|| missing("2d context"))?
			.dyn_into()
			.map_err(|_| missing("2d context"))?;
		container.append_child(&canvas).map_err(fail)?;

		let view = CanvasView {
			state: Rc::new(RefCell::new(state)),
			canvas,
			container: container.clone(),
			window,
			animate: Rc::new(RefCell::new(None)),
			frame: Rc::new(Cell::new(None)),
			mouse: Vec::new(),
			wheel: None,
			resize: None,
		};
		Ok(Box::new(view.start(ctx)))
	}
}

struct CanvasView {
	state: Rc<RefCell<ForceGraphState>>,
	canvas: HtmlCanvasElement,
	container: HtmlElement,
	window: Window,
	animate: FrameCallback,
	frame: Rc<Cell<Option<i32>>>,
	mouse: Vec<(&'static str, Closure<dyn FnMut(MouseEvent)>)>,
	wheel: Option<Closure<dyn FnMut(WheelEvent)>>,
	resize: Option<Closure<dyn FnMut()>>,
}

impl CanvasView {
	fn start(mut self, ctx: CanvasRenderingContext2d) -> Self {
		let (state_anim, animate_inner, frame_inner) =
			(self.state.clone(), self.animate.clone(), self.frame.clone());
		*self.animate.borrow_mut() = Some(Closure::new(move || {
			{
				let mut s = state_anim.borrow_mut();
				if s.animation_running {
					s.tick(TICK);
				}
				render::render(&s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				frame_inner.set(
					web_sys::window()
						.and_then(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()),
				);
			}
		}));
		if let Some(ref cb) = *self.animate.borrow() {
			self.frame.set(
				self.window
					.request_animation_frame(cb.as_ref().unchecked_ref())
					.ok(),
			);
		}

		let handlers: [(&'static str, PointerHandler); 4] = [
			("mousedown", |s, x, y| s.pointer_down(x, y)),
			("mousemove", |s, x, y| s.pointer_move(x, y)),
			("mouseup", |s, _, _| s.pointer_up()),
			("mouseleave", |s, _, _| s.pointer_leave()),
		];
		for (name, handler) in handlers {
			let (state, canvas) = (self.state.clone(), self.canvas.clone());
			let cb = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
				let (x, y) = local_position(&canvas, &ev);
				handler(&mut state.borrow_mut(), x, y);
			});
			let _ = self
				.canvas
				.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
			self.mouse.push((name, cb));
		}

		let (state_wh, canvas_wh) = (self.state.clone(), self.canvas.clone());
		let wheel = Closure::<dyn FnMut(WheelEvent)>::new(move |ev: WheelEvent| {
			ev.prevent_default();
			let (x, y) = local_position(&canvas_wh, &ev);
			state_wh.borrow_mut().zoom_at(x, y, ev.delta_y());
		});
		let _ = self
			.canvas
			.add_event_listener_with_callback("wheel", wheel.as_ref().unchecked_ref());
		self.wheel = Some(wheel);

		let (state_rs, canvas_rs, container_rs) = (
			self.state.clone(),
			self.canvas.clone(),
			self.container.clone(),
		);
		let resize = Closure::<dyn FnMut()>::new(move || {
			let (nw, nh) = container_size(&container_rs);
			canvas_rs.set_width(nw as u32);
			canvas_rs.set_height(nh as u32);
			state_rs.borrow_mut().resize(nw, nh);
		});
		let _ = self
			.window
			.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
		self.resize = Some(resize);

		self
	}
}

impl ViewHandle for CanvasView {
	fn engine(&self) -> EngineKind {
		EngineKind::Canvas
	}

	fn destroy(self: Box<Self>) {
		if let Some(id) = self.frame.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		// breaks the closure's reference to itself
		self.animate.borrow_mut().take();

		for (name, cb) in &self.mouse {
			let _ = self
				.canvas
				.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
		}
		if let Some(ref cb) = self.wheel {
			let _ = self
				.canvas
				.remove_event_listener_with_callback("wheel", cb.as_ref().unchecked_ref());
		}
		if let Some(ref cb) = self.resize {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		self.canvas.remove();
		debug!("Canvas view destroyed");
	}
}
