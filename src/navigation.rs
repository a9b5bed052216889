//! Which top-level stack is mounted, decided from the auth state alone.

use crate::core::store::AuthState;
use crate::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootRoute {
    Auth,
    DentistMain,
    PatientMain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tab {
    pub name: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

const AUTH_SCREENS: &[&str] = &[
    "UserTypeSelection",
    "Login",
    "RegisterDentist",
    "RegisterPatient",
    "AccountConfirmation",
];

const DENTIST_TABS: &[Tab] = &[
    Tab { name: "Dashboard", label: "Panel", icon: "dashboard" },
    Tab { name: "Patients", label: "Pacientes", icon: "group" },
    Tab { name: "Calendar", label: "Calendario", icon: "calendar-today" },
    Tab { name: "Messages", label: "Mensajes", icon: "chat-bubble" },
    Tab { name: "Settings", label: "Ajustes", icon: "settings" },
];

const PATIENT_TABS: &[Tab] = &[
    Tab { name: "Dashboard", label: "Inicio", icon: "home" },
    Tab { name: "Calendar", label: "Citas", icon: "calendar-today" },
    Tab { name: "Messages", label: "Mensajes", icon: "chat-bubble" },
    Tab { name: "Patients", label: "Perfil", icon: "person" },
    Tab { name: "Settings", label: "Ajustes", icon: "settings" },
];

const SHARED_MODALS: &[&str] = &["Resources", "ResourceDetail", "ProfileEdit", "ChangePassword"];

impl RootRoute {
    pub fn from_state(state: &AuthState) -> Self {
        match (&state.user, state.is_authenticated()) {
            (Some(user), true) => match user.role {
                Role::Dentist => RootRoute::DentistMain,
                Role::Patient => RootRoute::PatientMain,
            },
            _ => RootRoute::Auth,
        }
    }

    pub fn tabs(self) -> &'static [Tab] {
        match self {
            RootRoute::Auth => &[],
            RootRoute::DentistMain => DENTIST_TABS,
            RootRoute::PatientMain => PATIENT_TABS,
        }
    }

    /// Screens reachable on top of the tabs (or the auth flow itself).
    pub fn screens(self) -> Vec<&'static str> {
        match self {
            RootRoute::Auth => AUTH_SCREENS.to_vec(),
            RootRoute::DentistMain => {
                let mut screens = vec!["AppointmentForm"];
                screens.extend_from_slice(SHARED_MODALS);
                screens
            }
            RootRoute::PatientMain => SHARED_MODALS.to_vec(),
        }
    }

    pub fn allows(self, screen: &str) -> bool {
        self.screens().contains(&screen) || self.tabs().iter().any(|t| t.name == screen)
    }
}
