#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Interact,
    InteractAlt,
    InteractCycle,
}

const ACTION_COUNT: usize = 3;

impl InputAction {
    pub const ALL: [InputAction; ACTION_COUNT] = [
        InputAction::Interact,
        InputAction::InteractAlt,
        InputAction::InteractCycle,
    ];

    const fn index(self) -> usize {
        match self {
            InputAction::Interact => 0,
            InputAction::InteractAlt => 1,
            InputAction::InteractCycle => 2,
        }
    }

    pub fn identifier(self) -> &'static str {
        match self {
            InputAction::Interact => "interact-hotkey",
            InputAction::InteractAlt => "interact-hotkey-alt",
            InputAction::InteractCycle => "interact-hotkey-cycle",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            InputAction::Interact => "Interact",
            InputAction::InteractAlt => "Interact Alternative",
            InputAction::InteractCycle => "Interact Change Target",
        }
    }

    pub fn is_confirm(self) -> bool {
        matches!(self, InputAction::Interact | InputAction::InteractAlt)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ActionStates {
    down: [bool; ACTION_COUNT],
    pressed_edge: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub fn set(&mut self, action: InputAction, is_down: bool) {
        let index = action.index();
        if is_down && !self.down[index] {
            self.pressed_edge[index] = true;
        }
        self.down[index] = is_down;
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub fn take_pressed(&mut self) -> Vec<InputAction> {
        let mut pressed = Vec::new();
        for action in InputAction::ALL {
            let edge = &mut self.pressed_edge[action.index()];
            if *edge {
                pressed.push(action);
                *edge = false;
            }
        }
        pressed
    }
}
