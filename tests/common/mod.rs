//! Recording sinks with scripted failures

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use myrtio_marquee::{PixelSink, Rgb, TextSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Enable,
    Write,
    Clear,
    Brightness,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Enable(bool),
    Text(String),
    Clear,
    Brightness(u8),
    Pixels(Vec<Rgb>),
    Close,
}

#[derive(Debug, Default)]
pub struct BusState {
    pub calls: Vec<Call>,
    pub failing: Vec<Op>,
}

/// Shared view of a sink's traffic, kept by the test after the sink moves
#[derive(Debug, Clone, Default)]
pub struct Bus(Rc<RefCell<BusState>>);

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(ops: &[Op]) -> Self {
        let bus = Self::new();
        bus.fail(ops);
        bus
    }

    pub fn fail(&self, ops: &[Op]) {
        self.0.borrow_mut().failing = ops.to_vec();
    }

    pub fn heal(&self) {
        self.0.borrow_mut().failing.clear();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.0.borrow().calls.len()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Text(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn frames(&self) -> Vec<Vec<Rgb>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Pixels(frame) => Some(frame),
                _ => None,
            })
            .collect()
    }

    fn exec(&self, op: Op, call: Call) -> Result<(), BusError> {
        let mut state = self.0.borrow_mut();
        state.calls.push(call);
        if state.failing.contains(&op) {
            Err(BusError)
        } else {
            Ok(())
        }
    }
}

pub struct MockText {
    bus: Bus,
}

impl MockText {
    pub fn opener(bus: &Bus) -> impl FnOnce() -> Result<Self, BusError> {
        let bus = bus.clone();
        move || Ok(Self { bus })
    }
}

impl TextSink for MockText {
    type Error = BusError;

    fn enable(&mut self, enabled: bool) -> Result<(), BusError> {
        self.bus.exec(Op::Enable, Call::Enable(enabled))
    }

    fn write(&mut self, text: &str) -> Result<(), BusError> {
        self.bus.exec(Op::Write, Call::Text(text.into()))
    }

    fn clear(&mut self) -> Result<(), BusError> {
        self.bus.exec(Op::Clear, Call::Clear)
    }

    fn close(self) -> Result<(), BusError> {
        self.bus.exec(Op::Close, Call::Close)
    }
}

pub struct MockStrip {
    bus: Bus,
}

impl MockStrip {
    pub fn opener(bus: &Bus) -> impl FnOnce() -> Result<Self, BusError> {
        let bus = bus.clone();
        move || Ok(Self { bus })
    }
}

impl PixelSink for MockStrip {
    type Error = BusError;

    fn set_brightness(&mut self, level: u8) -> Result<(), BusError> {
        self.bus.exec(Op::Brightness, Call::Brightness(level))
    }

    fn write(&mut self, colors: &[Rgb]) -> Result<(), BusError> {
        self.bus.exec(Op::Write, Call::Pixels(colors.to_vec()))
    }

    fn close(self) -> Result<(), BusError> {
        self.bus.exec(Op::Close, Call::Close)
    }
}

pub fn unavailable<S>() -> impl FnOnce() -> Result<S, BusError> {
    || Err(BusError)
}
