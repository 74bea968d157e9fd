use std::sync::Arc;

use dioxus::prelude::*;

use garagem_core::auth::{AuthSession, PhoneAuthEvent};
use garagem_core::models::licence_display_label;
use garagem_core::{Car, CarDetail, CarId};

use crate::auth::PhoneAuthService;
use crate::config::resolve_client_config;
use crate::data::MobileCarStore;
use crate::form::{parse_location, validate, CarForm, CarFormErrors};
use crate::location::{EnvLocationProvider, LocationProvider};

#[derive(Clone, Copy, PartialEq, Eq)]
enum MobileView {
    Login,
    Home,
    Detail,
    AddEdit,
    Profile,
}

const ENV_GOOGLE_ID_TOKEN: &str = "GARAGEM_GOOGLE_ID_TOKEN";

#[component]
pub fn App() -> Element {
    rsx! {
        AppShell {}
    }
}

#[component]
fn AppShell() -> Element {
    let mut store = use_signal(|| None::<Arc<MobileCarStore>>);
    let mut auth_service = use_signal(|| None::<Arc<PhoneAuthService>>);
    let mut auth_session = use_signal(|| None::<AuthSession>);
    let mut view = use_signal(|| MobileView::Login);
    let mut status_message = use_signal(|| None::<String>);
    let mut booting = use_signal(|| true);
    let mut init_retry_version = use_signal(|| 0u64);

    // Home screen state
    let mut cars = use_signal(Vec::<Car>::new);
    let mut cars_loading = use_signal(|| true);
    let mut cars_error = use_signal(|| None::<String>);
    let mut cars_refresh_version = use_signal(|| 0u64);

    // Detail screen state
    let mut selected_car_id = use_signal(|| None::<String>);
    let mut detail = use_signal(|| None::<CarDetail>);
    let mut detail_loading = use_signal(|| false);
    let mut detail_error = use_signal(|| None::<String>);
    let mut deleting = use_signal(|| false);

    // Add/edit screen state
    let mut editing_car_id = use_signal(|| None::<String>);
    let mut form_loading = use_signal(|| false);
    let mut name_input = use_signal(String::new);
    let mut year_input = use_signal(String::new);
    let mut licence_input = use_signal(String::new);
    let mut image_url_input = use_signal(String::new);
    let mut image_path_input = use_signal(String::new);
    let mut lat_input = use_signal(String::new);
    let mut long_input = use_signal(String::new);
    let mut form_errors = use_signal(CarFormErrors::default);
    let mut save_error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    // Login screen state
    let mut phone_input = use_signal(String::new);
    let mut code_input = use_signal(String::new);
    let mut verification_id = use_signal(|| None::<String>);
    let mut show_code_input = use_signal(|| false);
    let mut auth_loading = use_signal(|| false);
    let mut auth_error = use_signal(|| None::<String>);

    // Bootstrap: resolve endpoints, build the store and auth service, and
    // pick the start view from the persisted session.
    use_future(move || async move {
        let _init_retry_version = init_retry_version();

        booting.set(true);
        store.set(None);
        auth_service.set(None);
        auth_session.set(None);
        status_message.set(None);

        let resolved = resolve_client_config();

        match MobileCarStore::new_from_config(&resolved.config) {
            Ok(car_store) => store.set(Some(Arc::new(car_store))),
            Err(error) => {
                status_message.set(Some(format!("Falha ao configurar a API: {error}")));
            }
        }

        match PhoneAuthService::new_from_config(&resolved.config) {
            Ok(Some(service)) => {
                let service = Arc::new(service);
                auth_service.set(Some(service.clone()));

                match service.restore_session() {
                    Ok(Some(session)) => {
                        auth_session.set(Some(session));
                        view.set(MobileView::Home);
                    }
                    Ok(None) => view.set(MobileView::Login),
                    Err(error) => {
                        tracing::warn!("Failed to restore session: {}", error);
                        view.set(MobileView::Login);
                    }
                }
            }
            Ok(None) => {
                // No auth endpoint provisioned: skip the login screen.
                view.set(MobileView::Home);
            }
            Err(error) => {
                status_message.set(Some(format!("Falha ao configurar autenticação: {error}")));
                view.set(MobileView::Login);
            }
        }

        booting.set(false);
    });

    // Car list loader, re-run whenever the store appears or a mutation bumps
    // the refresh version.
    use_future(move || async move {
        let _cars_refresh_version = cars_refresh_version();
        let Some(car_store) = store.read().clone() else {
            cars.set(Vec::new());
            cars_loading.set(false);
            return;
        };

        cars_loading.set(true);
        cars_error.set(None);

        match car_store.list_cars().await {
            Ok(loaded) => cars.set(loaded),
            Err(error) => {
                tracing::error!("Failed to load cars: {}", error);
                cars_error.set(Some(format!("Falha ao carregar carros: {error}")));
            }
        }

        cars_loading.set(false);
    });

    // Detail loader keyed on the selected car.
    use_future(move || async move {
        let selected = selected_car_id();

        let Some(car_store) = store.read().clone() else {
            detail.set(None);
            return;
        };
        let Some(car_id) = selected else {
            detail.set(None);
            detail_error.set(None);
            return;
        };

        detail_loading.set(true);
        detail_error.set(None);
        detail.set(None);

        match car_store.fetch_car(&car_id).await {
            Ok(loaded) => detail.set(Some(loaded)),
            Err(error) => detail_error.set(Some(format!("Falha ao carregar carro: {error}"))),
        }

        detail_loading.set(false);
    });

    let on_retry_init = move |_| {
        if booting() {
            return;
        }
        init_retry_version.set(init_retry_version() + 1);
    };

    let clear_form = move || {
        name_input.set(String::new());
        year_input.set(String::new());
        licence_input.set(String::new());
        image_url_input.set(String::new());
        image_path_input.set(String::new());
        lat_input.set(String::new());
        long_input.set(String::new());
        form_errors.set(CarFormErrors::default());
        save_error.set(None);
    };

    let on_new_car = move |_| {
        if store.read().is_none() {
            status_message.set(Some("A API ainda não está configurada".to_string()));
            return;
        }
        editing_car_id.set(None);
        clear_form();
        view.set(MobileView::AddEdit);
    };

    let on_open_car = move |car_id: String| {
        selected_car_id.set(Some(car_id));
        status_message.set(None);
        view.set(MobileView::Detail);
    };

    let on_edit_car = move |_| {
        if form_loading() {
            return;
        }
        let Some(car_store) = store.read().clone() else {
            status_message.set(Some("A API ainda não está configurada".to_string()));
            return;
        };
        let Some(car_id) = selected_car_id() else {
            return;
        };

        editing_car_id.set(Some(car_id.clone()));
        clear_form();
        form_loading.set(true);
        view.set(MobileView::AddEdit);

        spawn(async move {
            match car_store.fetch_car(&car_id).await {
                Ok(car) => {
                    name_input.set(car.name);
                    year_input.set(car.year);
                    licence_input.set(car.licence);
                    image_url_input.set(car.image_url);
                    lat_input.set(car.latitude.to_string());
                    long_input.set(car.longitude.to_string());
                }
                Err(error) => {
                    save_error.set(Some(format!("Falha ao carregar carro: {error}")));
                }
            }
            form_loading.set(false);
        });
    };

    let on_use_current_location = move |_| {
        match EnvLocationProvider.current_location() {
            Ok((latitude, longitude)) => {
                lat_input.set(latitude.to_string());
                long_input.set(longitude.to_string());
                form_errors.with_mut(|errors| errors.location = None);
            }
            Err(error) => {
                form_errors.with_mut(|errors| errors.location = Some(error));
            }
        }
    };

    let on_save_car = move |_| {
        if saving() || form_loading() {
            return;
        }
        let Some(car_store) = store.read().clone() else {
            status_message.set(Some("A API ainda não está configurada".to_string()));
            return;
        };

        let form = CarForm {
            name: name_input(),
            year: year_input(),
            licence: licence_input(),
            image_url: image_url_input(),
            image_path: image_path_input(),
            location: parse_location(&lat_input(), &long_input()),
            editing: editing_car_id().is_some(),
        };

        let errors = validate(&form);
        if !errors.is_empty() {
            form_errors.set(errors);
            return;
        }
        form_errors.set(CarFormErrors::default());
        save_error.set(None);
        saving.set(true);

        spawn(async move {
            let image_url = match resolve_image_url(&car_store, &form).await {
                Ok(url) => url,
                Err(error) => {
                    save_error.set(Some(format!("Falha no upload da imagem: {error}")));
                    saving.set(false);
                    return;
                }
            };

            let Some((latitude, longitude)) = form.location else {
                saving.set(false);
                return;
            };

            let car = CarDetail {
                id: editing_car_id().unwrap_or_else(|| CarId::new().as_str()),
                image_url,
                year: form.year.trim().to_string(),
                name: form.name.trim().to_string(),
                licence: form.licence.trim().to_string(),
                latitude,
                longitude,
            };

            let save_result = if form.editing {
                car_store.update_car(&car).await
            } else {
                car_store.add_car(&car).await
            };

            match save_result {
                Ok(()) => {
                    status_message.set(Some("Carro salvo".to_string()));
                    selected_car_id.set(None);
                    cars_refresh_version.set(cars_refresh_version() + 1);
                    view.set(MobileView::Home);
                }
                Err(error) => {
                    save_error.set(Some(format!("Falha ao salvar dados: {error}")));
                }
            }

            saving.set(false);
        });
    };

    let on_delete_car = move |_| {
        if deleting() {
            return;
        }
        let Some(car_store) = store.read().clone() else {
            status_message.set(Some("A API ainda não está configurada".to_string()));
            return;
        };
        let Some(car_id) = selected_car_id() else {
            return;
        };

        deleting.set(true);

        spawn(async move {
            match car_store.delete_car(&car_id).await {
                Ok(()) => {
                    selected_car_id.set(None);
                    status_message.set(Some("Carro excluído".to_string()));
                    cars_refresh_version.set(cars_refresh_version() + 1);
                    view.set(MobileView::Home);
                }
                Err(error) => {
                    detail_error.set(Some(format!("Erro ao deletar: {error}")));
                }
            }
            deleting.set(false);
        });
    };

    let on_send_code = move |_| {
        if auth_loading() {
            return;
        }
        let Some(service) = auth_service.read().clone() else {
            auth_error.set(Some("Autenticação não está configurada".to_string()));
            return;
        };

        auth_loading.set(true);
        auth_error.set(None);

        spawn(async move {
            match service.request_code(&phone_input()).await {
                Ok(PhoneAuthEvent::CodeSent {
                    verification_id: new_verification_id,
                }) => {
                    verification_id.set(Some(new_verification_id));
                    show_code_input.set(true);
                }
                Ok(PhoneAuthEvent::VerificationCompleted(session)) => {
                    auth_session.set(Some(session));
                    view.set(MobileView::Home);
                }
                Err(error) => {
                    auth_error.set(Some(error.to_string()));
                }
            }
            auth_loading.set(false);
        });
    };

    let on_verify_code = move |_| {
        if auth_loading() {
            return;
        }
        let Some(service) = auth_service.read().clone() else {
            auth_error.set(Some("Autenticação não está configurada".to_string()));
            return;
        };
        let Some(current_verification_id) = verification_id() else {
            auth_error.set(Some("ID de verificação não encontrado.".to_string()));
            return;
        };

        auth_loading.set(true);
        auth_error.set(None);

        spawn(async move {
            match service
                .sign_in_with_code(&current_verification_id, &code_input())
                .await
            {
                Ok(session) => {
                    auth_session.set(Some(session));
                    code_input.set(String::new());
                    view.set(MobileView::Home);
                }
                Err(error) => {
                    tracing::warn!("Phone sign-in failed: {}", error);
                    auth_error.set(Some("Falha ao fazer login. Código inválido?".to_string()));
                }
            }
            auth_loading.set(false);
        });
    };

    let on_google_sign_in = move |_| {
        if auth_loading() {
            return;
        }
        let Some(service) = auth_service.read().clone() else {
            auth_error.set(Some("Autenticação não está configurada".to_string()));
            return;
        };
        let Some(id_token) = platform_google_id_token() else {
            auth_error.set(Some("Falha ao obter o token do Google.".to_string()));
            return;
        };

        auth_loading.set(true);
        auth_error.set(None);

        spawn(async move {
            match service.sign_in_with_google(&id_token).await {
                Ok(session) => {
                    auth_session.set(Some(session));
                    view.set(MobileView::Home);
                }
                Err(error) => {
                    tracing::warn!("Google sign-in failed: {}", error);
                    auth_error.set(Some("Falha na autenticação.".to_string()));
                }
            }
            auth_loading.set(false);
        });
    };

    let on_logout = move |_| {
        let Some(service) = auth_service.read().clone() else {
            return;
        };
        let Some(session) = auth_session() else {
            return;
        };

        spawn(async move {
            if let Err(error) = service.sign_out(&session.access_token).await {
                tracing::warn!("Sign-out failed: {}", error);
            }
            auth_session.set(None);
            phone_input.set(String::new());
            show_code_input.set(false);
            verification_id.set(None);
            view.set(MobileView::Login);
        });
    };

    let on_back_to_home = move |_| {
        selected_car_id.set(None);
        view.set(MobileView::Home);
    };

    let on_open_profile = move |_| {
        view.set(MobileView::Profile);
    };

    let heading = view_heading(view(), editing_car_id().is_some());

    rsx! {
        div {
            style: "
                height: 100vh;
                display: flex;
                flex-direction: column;
                background: #f6f8fb;
                color: #111827;
                font-family: system-ui, sans-serif;
            ",

            div {
                style: "
                    padding: 14px 16px;
                    display: flex;
                    justify-content: space-between;
                    align-items: center;
                    background: #ffffff;
                    border-bottom: 1px solid #e5e7eb;
                ",
                h1 {
                    style: "margin: 0; font-size: 22px;",
                    "{heading}"
                }
                if view() == MobileView::Home && auth_service.read().is_some() {
                    button {
                        type: "button",
                        style: "
                            border: 1px solid #d1d5db;
                            border-radius: 8px;
                            padding: 6px 10px;
                            background: #ffffff;
                            color: #111827;
                            font-size: 12px;
                            font-weight: 600;
                        ",
                        onclick: on_open_profile,
                        "Perfil"
                    }
                }
            }

            if let Some(message) = status_message() {
                p {
                    style: "
                        margin: 0;
                        padding: 10px 16px;
                        font-size: 13px;
                        color: #374151;
                        border-bottom: 1px solid #e5e7eb;
                    ",
                    "{message}"
                }
            }

            if booting() {
                div {
                    style: "
                        flex: 1;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        color: #6b7280;
                    ",
                    "Carregando..."
                }
            } else if view() == MobileView::Login {
                div {
                    style: "
                        flex: 1;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        padding: 20px;
                    ",
                    div {
                        style: "
                            width: 100%;
                            max-width: 360px;
                            background: #ffffff;
                            border: 1px solid #e5e7eb;
                            border-radius: 12px;
                            padding: 16px;
                            display: flex;
                            flex-direction: column;
                            gap: 10px;
                        ",
                        p {
                            style: "margin: 0; font-size: 14px; font-weight: 600;",
                            "Entrar com telefone"
                        }
                        input {
                            r#type: "tel",
                            placeholder: "(11) 98765-4321",
                            value: "{phone_input}",
                            style: "
                                border: 1px solid #d1d5db;
                                border-radius: 8px;
                                padding: 10px;
                                font-size: 14px;
                            ",
                            oninput: move |event: Event<FormData>| {
                                phone_input.set(event.value());
                            },
                        }
                        button {
                            type: "button",
                            style: "
                                border: 0;
                                border-radius: 8px;
                                padding: 10px;
                                background: #2563eb;
                                color: #ffffff;
                                font-weight: 600;
                            ",
                            disabled: auth_loading(),
                            onclick: on_send_code,
                            if auth_loading() && !show_code_input() {
                                "Enviando..."
                            } else {
                                "Enviar código"
                            }
                        }

                        if show_code_input() {
                            input {
                                r#type: "text",
                                inputmode: "numeric",
                                placeholder: "Código de verificação",
                                value: "{code_input}",
                                style: "
                                    border: 1px solid #d1d5db;
                                    border-radius: 8px;
                                    padding: 10px;
                                    font-size: 14px;
                                ",
                                oninput: move |event: Event<FormData>| {
                                    code_input.set(event.value());
                                },
                            }
                            button {
                                type: "button",
                                style: "
                                    border: 0;
                                    border-radius: 8px;
                                    padding: 10px;
                                    background: #111827;
                                    color: #ffffff;
                                    font-weight: 600;
                                ",
                                disabled: auth_loading(),
                                onclick: on_verify_code,
                                if auth_loading() { "Verificando..." } else { "Verificar" }
                            }
                        }

                        button {
                            type: "button",
                            style: "
                                border: 1px solid #d1d5db;
                                border-radius: 8px;
                                padding: 10px;
                                background: #ffffff;
                                color: #111827;
                                font-weight: 600;
                            ",
                            disabled: auth_loading(),
                            onclick: on_google_sign_in,
                            "Entrar com Google"
                        }

                        if let Some(error) = auth_error() {
                            p {
                                style: "margin: 0; font-size: 12px; color: #b91c1c;",
                                "{error}"
                            }
                        }
                    }
                }
            } else if view() == MobileView::Home {
                if store.read().is_none() {
                    div {
                        style: "
                            flex: 1;
                            display: flex;
                            align-items: center;
                            justify-content: center;
                            padding: 20px;
                        ",
                        div {
                            style: "
                                width: 100%;
                                max-width: 360px;
                                background: #ffffff;
                                border: 1px solid #e5e7eb;
                                border-radius: 12px;
                                padding: 16px;
                                display: flex;
                                flex-direction: column;
                                gap: 10px;
                                color: #374151;
                            ",
                            p {
                                style: "margin: 0; font-size: 14px; font-weight: 600; color: #111827;",
                                "A API não está configurada"
                            }
                            p {
                                style: "margin: 0; font-size: 12px; color: #6b7280;",
                                "Defina GARAGEM_API_BASE_URL e tente novamente."
                            }
                            button {
                                type: "button",
                                style: "
                                    border: 0;
                                    border-radius: 8px;
                                    padding: 10px 12px;
                                    background: #2563eb;
                                    color: #ffffff;
                                    font-weight: 600;
                                ",
                                onclick: on_retry_init,
                                disabled: booting(),
                                "Tentar novamente"
                            }
                        }
                    }
                } else {
                    div {
                        style: "padding: 12px 16px; display: flex; gap: 8px;",
                        button {
                            type: "button",
                            style: "
                                flex: 1;
                                border: 0;
                                border-radius: 10px;
                                padding: 12px;
                                background: #111827;
                                color: #ffffff;
                                font-weight: 600;
                                font-size: 14px;
                            ",
                            onclick: on_new_car,
                            "Adicionar carro"
                        }
                    }

                    div {
                        style: "flex: 1; overflow-y: auto; padding: 0 12px 16px 12px;",

                        if cars_loading() {
                            div {
                                style: "margin-top: 24px; text-align: center; color: #6b7280;",
                                "Carregando carros..."
                            }
                        } else if let Some(error) = cars_error() {
                            div {
                                style: "
                                    margin-top: 24px;
                                    padding: 20px;
                                    background: #ffffff;
                                    border: 1px solid #ef4444;
                                    border-radius: 12px;
                                    color: #b91c1c;
                                    display: flex;
                                    flex-direction: column;
                                    gap: 10px;
                                ",
                                p { style: "margin: 0; font-size: 13px;", "{error}" }
                                button {
                                    type: "button",
                                    style: "
                                        border: 1px solid #d1d5db;
                                        border-radius: 8px;
                                        padding: 8px;
                                        background: #ffffff;
                                        color: #111827;
                                        font-weight: 600;
                                    ",
                                    onclick: move |_| {
                                        cars_refresh_version.set(cars_refresh_version() + 1);
                                    },
                                    "Tentar novamente"
                                }
                            }
                        } else if cars().is_empty() {
                            div {
                                style: "
                                    margin-top: 24px;
                                    padding: 20px;
                                    background: #ffffff;
                                    border: 1px solid #e5e7eb;
                                    border-radius: 12px;
                                    text-align: center;
                                    color: #6b7280;
                                ",
                                "Nenhum carro ainda. Adicione o primeiro."
                            }
                        } else {
                            for car in cars() {
                                {
                                    let car_id = car.id.clone();
                                    let car_key = car.id.clone();
                                    let car_name = car.name.clone();
                                    let image_url = car.image_url.clone();
                                    let licence_label = licence_display_label(&car.licence);

                                    rsx! {
                                        button {
                                            key: "{car_key}",
                                            type: "button",
                                            style: "
                                                margin-bottom: 10px;
                                                width: 100%;
                                                border: 1px solid #e5e7eb;
                                                background: #ffffff;
                                                border-radius: 12px;
                                                padding: 12px;
                                                text-align: left;
                                                display: flex;
                                                gap: 12px;
                                                align-items: center;
                                            ",
                                            onclick: move |_| on_open_car(car_id.clone()),

                                            img {
                                                src: "{image_url}",
                                                alt: "{car_name}",
                                                style: "
                                                    width: 64px;
                                                    height: 64px;
                                                    object-fit: cover;
                                                    border-radius: 8px;
                                                    background: #e5e7eb;
                                                ",
                                            }
                                            div {
                                                p {
                                                    style: "
                                                        margin: 0 0 4px 0;
                                                        font-size: 15px;
                                                        font-weight: 600;
                                                        color: #111827;
                                                    ",
                                                    "{car_name}"
                                                }
                                                p {
                                                    style: "margin: 0; font-size: 13px; color: #6b7280;",
                                                    "{licence_label}"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            } else if view() == MobileView::Detail {
                div {
                    style: "padding: 10px 12px; display: flex; gap: 8px; background: #ffffff;",
                    button {
                        type: "button",
                        style: "
                            border: 1px solid #d1d5db;
                            border-radius: 8px;
                            padding: 10px 12px;
                            background: #ffffff;
                            font-weight: 600;
                        ",
                        onclick: on_back_to_home,
                        "Voltar"
                    }
                    button {
                        type: "button",
                        style: "
                            border: 0;
                            border-radius: 8px;
                            padding: 10px 12px;
                            background: #2563eb;
                            color: #ffffff;
                            font-weight: 600;
                        ",
                        disabled: detail_loading() || detail.read().is_none(),
                        onclick: on_edit_car,
                        "Editar"
                    }
                    button {
                        type: "button",
                        style: "
                            margin-left: auto;
                            border: 1px solid #ef4444;
                            border-radius: 8px;
                            padding: 10px 12px;
                            background: #ffffff;
                            color: #b91c1c;
                            font-weight: 600;
                        ",
                        disabled: deleting(),
                        onclick: on_delete_car,
                        if deleting() { "Excluindo..." } else { "Excluir" }
                    }
                }

                div {
                    style: "flex: 1; overflow-y: auto; padding: 12px;",

                    if detail_loading() {
                        div {
                            style: "margin-top: 24px; text-align: center; color: #6b7280;",
                            "Carregando carro..."
                        }
                    } else if let Some(error) = detail_error() {
                        p {
                            style: "margin: 12px 0; font-size: 13px; color: #b91c1c;",
                            "{error}"
                        }
                    } else if let Some(car) = detail() {
                        div {
                            style: "
                                background: #ffffff;
                                border: 1px solid #e5e7eb;
                                border-radius: 12px;
                                padding: 16px;
                                display: flex;
                                flex-direction: column;
                                gap: 8px;
                            ",
                            img {
                                src: "{car.image_url}",
                                alt: "{car.name}",
                                style: "
                                    width: 100%;
                                    max-height: 220px;
                                    object-fit: cover;
                                    border-radius: 10px;
                                    background: #e5e7eb;
                                ",
                            }
                            p {
                                style: "margin: 0; font-size: 18px; font-weight: 700;",
                                "{car.name}"
                            }
                            p {
                                style: "margin: 0; font-size: 14px; color: #374151;",
                                "Ano: {car.year}"
                            }
                            p {
                                style: "margin: 0; font-size: 14px; color: #374151;",
                                "{licence_display_label(&car.licence)}"
                            }
                            p {
                                style: "margin: 0; font-size: 13px; color: #6b7280;",
                                "Localização: {format_coordinates(car.latitude, car.longitude)}"
                            }
                        }
                    }
                }
            } else if view() == MobileView::AddEdit {
                div {
                    style: "padding: 10px 12px; display: flex; gap: 8px; background: #ffffff;",
                    button {
                        type: "button",
                        style: "
                            border: 1px solid #d1d5db;
                            border-radius: 8px;
                            padding: 10px 12px;
                            background: #ffffff;
                            font-weight: 600;
                        ",
                        onclick: move |_| {
                            if editing_car_id().is_some() {
                                view.set(MobileView::Detail);
                            } else {
                                view.set(MobileView::Home);
                            }
                        },
                        "Cancelar"
                    }
                    button {
                        type: "button",
                        style: "
                            border: 0;
                            border-radius: 8px;
                            padding: 10px 12px;
                            background: #2563eb;
                            color: #ffffff;
                            font-weight: 600;
                        ",
                        disabled: saving() || form_loading(),
                        onclick: on_save_car,
                        if saving() { "Salvando..." } else { "Salvar" }
                    }
                }

                div {
                    style: "
                        flex: 1;
                        overflow-y: auto;
                        padding: 12px;
                        display: flex;
                        flex-direction: column;
                        gap: 8px;
                    ",

                    if form_loading() {
                        div {
                            style: "margin-top: 24px; text-align: center; color: #6b7280;",
                            "Carregando carro..."
                        }
                    } else {
                        FormField {
                            label: "Nome",
                            placeholder: "Civic",
                            value: name_input(),
                            error: form_errors().name,
                            oninput: move |value| {
                                name_input.set(value);
                                form_errors.with_mut(|errors| errors.name = None);
                            },
                        }
                        FormField {
                            label: "Ano",
                            placeholder: "2020",
                            value: year_input(),
                            error: form_errors().year,
                            oninput: move |value| {
                                year_input.set(value);
                                form_errors.with_mut(|errors| errors.year = None);
                            },
                        }
                        FormField {
                            label: "Placa",
                            placeholder: "ABC1D23",
                            value: licence_input(),
                            error: form_errors().licence,
                            oninput: move |value| {
                                licence_input.set(value);
                                form_errors.with_mut(|errors| errors.licence = None);
                            },
                        }
                        FormField {
                            label: "Foto (URL)",
                            placeholder: "https://...",
                            value: image_url_input(),
                            error: None,
                            oninput: move |value| {
                                image_url_input.set(value);
                                form_errors.with_mut(|errors| errors.image = None);
                            },
                        }
                        FormField {
                            label: "Foto (arquivo no dispositivo)",
                            placeholder: "/storage/emulated/0/DCIM/car.jpg",
                            value: image_path_input(),
                            error: form_errors().image,
                            oninput: move |value| {
                                image_path_input.set(value);
                                form_errors.with_mut(|errors| errors.image = None);
                            },
                        }
                        FormField {
                            label: "Latitude",
                            placeholder: "-23.55",
                            value: lat_input(),
                            error: None,
                            oninput: move |value| {
                                lat_input.set(value);
                                form_errors.with_mut(|errors| errors.location = None);
                            },
                        }
                        FormField {
                            label: "Longitude",
                            placeholder: "-46.63",
                            value: long_input(),
                            error: form_errors().location,
                            oninput: move |value| {
                                long_input.set(value);
                                form_errors.with_mut(|errors| errors.location = None);
                            },
                        }

                        button {
                            type: "button",
                            style: "
                                border: 1px solid #d1d5db;
                                border-radius: 8px;
                                padding: 10px;
                                background: #ffffff;
                                color: #111827;
                                font-weight: 600;
                            ",
                            onclick: on_use_current_location,
                            "Usar localização atual"
                        }

                        if let Some(error) = save_error() {
                            p {
                                style: "margin: 0; font-size: 12px; color: #b91c1c;",
                                "{error}"
                            }
                        }
                    }
                }
            } else {
                div {
                    style: "padding: 10px 12px; display: flex; gap: 8px; background: #ffffff;",
                    button {
                        type: "button",
                        style: "
                            border: 1px solid #d1d5db;
                            border-radius: 8px;
                            padding: 10px 12px;
                            background: #ffffff;
                            font-weight: 600;
                        ",
                        onclick: on_back_to_home,
                        "Voltar"
                    }
                }

                div {
                    style: "flex: 1; padding: 12px;",
                    div {
                        style: "
                            background: #ffffff;
                            border: 1px solid #e5e7eb;
                            border-radius: 12px;
                            padding: 16px;
                            display: flex;
                            flex-direction: column;
                            gap: 8px;
                        ",
                        if let Some(session) = auth_session() {
                            {
                                let display_name = session
                                    .user
                                    .display_name
                                    .clone()
                                    .unwrap_or_else(|| "Sem nome".to_string());
                                let email = session
                                    .user
                                    .email
                                    .clone()
                                    .unwrap_or_else(|| "Sem e-mail".to_string());
                                let photo_url = session.user.photo_url.clone();

                                rsx! {
                                    if let Some(photo_url) = photo_url {
                                        img {
                                            src: "{photo_url}",
                                            alt: "Foto do perfil",
                                            style: "
                                                width: 72px;
                                                height: 72px;
                                                border-radius: 36px;
                                                object-fit: cover;
                                                background: #e5e7eb;
                                            ",
                                        }
                                    }
                                    p {
                                        style: "margin: 0; font-size: 16px; font-weight: 700;",
                                        "{display_name}"
                                    }
                                    p {
                                        style: "margin: 0; font-size: 13px; color: #6b7280;",
                                        "{email}"
                                    }
                                    button {
                                        type: "button",
                                        style: "
                                            margin-top: 8px;
                                            border: 1px solid #ef4444;
                                            border-radius: 8px;
                                            padding: 10px;
                                            background: #ffffff;
                                            color: #b91c1c;
                                            font-weight: 600;
                                        ",
                                        onclick: on_logout,
                                        "Sair"
                                    }
                                }
                            }
                        } else {
                            p {
                                style: "margin: 0; font-size: 13px; color: #6b7280;",
                                "Nenhum usuário conectado."
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FormField(
    label: &'static str,
    placeholder: &'static str,
    value: String,
    error: Option<String>,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 4px;",
            p {
                style: "margin: 0; font-size: 12px; color: #6b7280;",
                "{label}"
            }
            input {
                r#type: "text",
                placeholder: "{placeholder}",
                value: "{value}",
                style: "
                    border: 1px solid #d1d5db;
                    border-radius: 8px;
                    padding: 10px;
                    font-size: 14px;
                    background: #ffffff;
                ",
                oninput: move |event: Event<FormData>| {
                    oninput.call(event.value());
                },
            }
            if let Some(error) = error {
                p {
                    style: "margin: 0; font-size: 12px; color: #b91c1c;",
                    "{error}"
                }
            }
        }
    }
}

/// Upload the picked photo when present; otherwise keep the URL field.
async fn resolve_image_url(store: &MobileCarStore, form: &CarForm) -> Result<String, String> {
    let image_path = form.image_path.trim();
    if image_path.is_empty() {
        return Ok(form.image_url.trim().to_string());
    }

    let bytes = std::fs::read(image_path).map_err(|error| error.to_string())?;
    let content_type = mime_guess::from_path(image_path).first_raw();
    store
        .upload_image(&bytes, content_type)
        .await
        .map_err(|error| error.to_string())
}

/// Google id token injected by the platform layer; the sign-in SDK itself
/// stays outside this app.
fn platform_google_id_token() -> Option<String> {
    let token = std::env::var(ENV_GOOGLE_ID_TOKEN).ok()?;
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

const fn view_heading(view: MobileView, editing: bool) -> &'static str {
    match view {
        MobileView::Login => "Garagem",
        MobileView::Home => "Meus Carros",
        MobileView::Detail => "Detalhes",
        MobileView::AddEdit => {
            if editing {
                "Editar Carro"
            } else {
                "Adicionar Carro"
            }
        }
        MobileView::Profile => "Perfil",
    }
}

fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.6}, {longitude:.6}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_follow_the_edit_flag() {
        assert_eq!(view_heading(MobileView::AddEdit, false), "Adicionar Carro");
        assert_eq!(view_heading(MobileView::AddEdit, true), "Editar Carro");
        assert_eq!(view_heading(MobileView::Home, false), "Meus Carros");
    }

    #[test]
    fn coordinates_render_with_fixed_precision() {
        assert_eq!(format_coordinates(1.0, 2.0), "1.000000, 2.000000");
    }
}
