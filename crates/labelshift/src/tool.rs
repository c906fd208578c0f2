//! Pointer tools and the chain that dispatches events to them.
//!
//! A [`ToolChain`] holds tools in priority order. While no tool is active,
//! every pointer move with the primary button held asks each tool, in
//! order, whether it can start; the first that can is activated and
//! receives events until it stops.
//!
//! Activation lifecycle of one tool:
//!
//! 1. [`Tool::can_start`] returns `true`
//! 2. [`Tool::on_activate`], then [`Tool::on_move`] for the triggering move
//! 3. [`Tool::on_move`] for each further move
//! 4. [`Tool::on_release`] on pointer-up, or [`Tool::on_cancel`] when the
//!    gesture is cancelled
//! 5. [`Tool::on_deactivate`], then [`Tool::on_stop`]

use log::{debug, info};

use crate::{
    config::ToolConfig,
    diagram::ToolHost,
    geometry::Point,
    input::{InputState, PointerButton},
};

/// What the chain should do with a tool after it handled a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFlow {
    /// Keep the tool active
    Continue,
    /// Deactivate and stop the tool
    Stop,
}

/// The host and pointer state handed to a tool for one event.
pub struct ToolContext<'a> {
    host: &'a mut dyn ToolHost,
    input: &'a InputState,
}

impl<'a> ToolContext<'a> {
    pub fn new(host: &'a mut dyn ToolHost, input: &'a InputState) -> Self {
        Self { host, input }
    }

    /// Read access to the host diagram
    pub fn host(&self) -> &dyn ToolHost {
        &*self.host
    }

    /// Write access to the host diagram
    pub fn host_mut(&mut self) -> &mut dyn ToolHost {
        &mut *self.host
    }

    /// Current pointer state
    pub fn input(&self) -> &InputState {
        self.input
    }
}

/// A pointer tool that can be registered in a [`ToolChain`].
///
/// Hooks are only called in the order described in the module
/// documentation. None of them can fail: a tool that cannot handle an event
/// simply does nothing.
pub trait Tool {
    /// Name used to find the tool in a chain
    fn name(&self) -> &str;

    /// Whether the tool wants to take over the current gesture
    fn can_start(&self, ctx: &ToolContext<'_>) -> bool;

    fn on_activate(&mut self, ctx: &mut ToolContext<'_>);

    fn on_move(&mut self, ctx: &mut ToolContext<'_>);

    fn on_release(&mut self, ctx: &mut ToolContext<'_>) -> ToolFlow;

    fn on_cancel(&mut self, ctx: &mut ToolContext<'_>);

    /// Called before [`Tool::on_stop`] while the tool still holds its state
    fn on_deactivate(&mut self, ctx: &mut ToolContext<'_>);

    /// Clears all per-gesture state
    fn on_stop(&mut self);
}

/// An ordered chain of tools with at most one active tool.
pub struct ToolChain {
    tools: Vec<Box<dyn Tool>>,
    active: Option<usize>,
    input: InputState,
}

impl ToolChain {
    /// Creates an empty chain using the configured drag threshold
    pub fn new(config: &ToolConfig) -> Self {
        Self {
            tools: Vec::new(),
            active: None,
            input: InputState::new(config.drag_threshold()),
        }
    }

    /// Appends a tool with the lowest priority
    pub fn push(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Inserts a tool at `index`, ahead of the tools from `index` on.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, like [`Vec::insert`].
    pub fn insert(&mut self, index: usize, tool: Box<dyn Tool>) {
        self.tools.insert(index, tool);
        if let Some(active) = self.active.as_mut() {
            if *active >= index {
                *active += 1;
            }
        }
    }

    /// Inserts a tool directly ahead of the tool named `before`, or at the
    /// end when no such tool exists.
    pub fn insert_before(&mut self, before: &str, tool: Box<dyn Tool>) {
        let index = self.position(before).unwrap_or(self.tools.len());
        self.insert(index, tool);
    }

    /// Inserts a tool directly behind the tool named `after`, or at the end
    /// when no such tool exists.
    pub fn insert_after(&mut self, after: &str, tool: Box<dyn Tool>) {
        let index = self
            .position(after)
            .map_or(self.tools.len(), |index| index + 1);
        self.insert(index, tool);
    }

    /// Index of the first tool named `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.tools.iter().position(|tool| tool.name() == name)
    }

    /// Tool names in priority order
    pub fn tool_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.tools.iter().map(|tool| tool.name())
    }

    /// Name of the active tool, if any
    pub fn active_tool_name(&self) -> Option<&str> {
        self.active.map(|index| self.tools[index].name())
    }

    /// Current pointer state
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Starts a new gesture at `point`.
    pub fn pointer_down(&mut self, button: PointerButton, point: Point, host: &mut dyn ToolHost) {
        if self.active.is_some() {
            // A new press while a tool is active ends the old gesture first
            self.cancel(host);
        }
        self.input.press(button, point);
    }

    /// Routes a move to the active tool, or activates the first tool that
    /// can start.
    pub fn pointer_move(&mut self, point: Point, host: &mut dyn ToolHost) {
        self.input.move_to(point);

        let index = match self.active {
            Some(index) => index,
            None => {
                if !self.input.is_primary_down() {
                    return;
                }
                let Some(index) = self.find_starting_tool(host) else {
                    return;
                };
                let mut ctx = ToolContext::new(host, &self.input);
                let tool = &mut self.tools[index];
                info!(tool = tool.name(); "Tool activated");
                tool.on_activate(&mut ctx);
                self.active = Some(index);
                index
            }
        };

        let mut ctx = ToolContext::new(host, &self.input);
        self.tools[index].on_move(&mut ctx);
    }

    /// Ends the gesture at `point`.
    pub fn pointer_up(&mut self, point: Point, host: &mut dyn ToolHost) {
        self.input.release(point);

        let Some(index) = self.active else {
            return;
        };
        let mut ctx = ToolContext::new(host, &self.input);
        if self.tools[index].on_release(&mut ctx) == ToolFlow::Stop {
            self.finish(index, host);
        }
    }

    /// Cancels the active tool, if any.
    pub fn cancel(&mut self, host: &mut dyn ToolHost) {
        let Some(index) = self.active else {
            return;
        };
        let mut ctx = ToolContext::new(host, &self.input);
        self.tools[index].on_cancel(&mut ctx);
        self.finish(index, host);
    }

    fn find_starting_tool(&self, host: &mut dyn ToolHost) -> Option<usize> {
        let ctx = ToolContext::new(host, &self.input);
        self.tools.iter().position(|tool| tool.can_start(&ctx))
    }

    fn finish(&mut self, index: usize, host: &mut dyn ToolHost) {
        let mut ctx = ToolContext::new(host, &self.input);
        let tool = &mut self.tools[index];
        tool.on_deactivate(&mut ctx);
        tool.on_stop();
        debug!(tool = tool.name(); "Tool stopped");
        self.active = None;
    }
}
