//! Application components and pages.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::path;
use std::collections::HashSet;
use std::rc::Rc;

use kiosk_client::HttpBasketService;
use kiosk_core::{
    BasketSnapshot, ItemId, Notice, NoticeKind, PaymentField, PaymentForm, PricingBreakdown,
    Product, ProductId, ValidationErrors, NOTICE_TTL,
};
use kiosk_flow::{
    BasketSession, CatalogSession, CheckoutFlow, CheckoutPhase, LoadState, Receipt,
};
use kiosk_session::SessionIdentity;

use crate::platform::{self, SimulatedGateway};

fn basket_service() -> Rc<HttpBasketService> {
    Rc::new(HttpBasketService::new())
}

// ============================================================================
// App Component
// ============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let fallback = || view! { <NotFound/> }.into_view();

    view! {
        <Stylesheet id="leptos" href="/pkg/kiosk_app.css"/>
        <Meta name="description" content="Self-service kiosk storefront"/>
        <Title text="Kiosk Store"/>

        <Router>
            <Header/>
            <main>
                <Routes fallback>
                    <Route path=path!("") view=ProductsPage/>
                    <Route path=path!("/basket") view=BasketPage/>
                    <Route path=path!("/checkout") view=CheckoutPage/>
                    <Route path=path!("/*any") view=NotFound/>
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}

// ============================================================================
// Layout Components
// ============================================================================

#[component]
fn Header() -> impl IntoView {
    view! {
        <header>
            <h1>"Kiosk Store"</h1>
            <nav>
                <a href="/">"Products"</a>
                <a href="/basket">"Basket"</a>
                <a href="/checkout">"Checkout"</a>
            </nav>
        </header>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer>
            <p>"Self-service kiosk - scan less, shop more"</p>
        </footer>
    }
}

/// 404 page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div style="text-align: center; padding: 4rem;">
            <h1>"404"</h1>
            <p>"Page not found"</p>
            <a href="/">"Back to Products"</a>
        </div>
    }
}

// ============================================================================
// Shared Components
// ============================================================================

/// Dismissible transient notification banner.
#[component]
fn NoticeBanner<F>(notice: RwSignal<Option<Notice>>, on_dismiss: F) -> impl IntoView
where
    F: Fn() + Copy + Send + 'static,
{
    view! {
        {move || notice.get().map(|notice| {
            let class = match notice.kind {
                NoticeKind::Success => "alert alert-success",
                NoticeKind::Failure => "alert alert-failure",
            };
            view! {
                <div class=class role="status">
                    <span>{notice.message}</span>
                    <button class="alert-dismiss" on:click=move |_| on_dismiss()>"\u{00d7}"</button>
                </div>
            }
        })}
    }
}

/// Failure panel with a manual retry.
#[component]
fn ErrorPanel<F>(message: String, on_retry: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    view! {
        <div class="error-panel">
            <p>{message}</p>
            <button class="btn" on:click=move |_| on_retry()>"Try Again"</button>
        </div>
    }
}

/// Itemized totals for a basket snapshot, recomputed on render.
#[component]
fn OrderSummary(snapshot: BasketSnapshot) -> impl IntoView {
    let breakdown = PricingBreakdown::for_items(&snapshot.items);
    let item_count = snapshot.item_count;

    view! {
        <div class="order-summary">
            {snapshot.items.iter().map(|item| {
                let quantity = item.quantity_or_one();
                view! {
                    <div class="summary-row">
                        <span>{item.product_name.clone()} " x " {quantity.to_string()}</span>
                        <span>{format!("${:.2}", item.price_or_zero() * quantity as f64)}</span>
                    </div>
                }
            }).collect::<Vec<_>>()}
            <div class="summary-row">
                <span>{format!("Subtotal ({item_count} items)")}</span>
                <span>{breakdown.subtotal_display()}</span>
            </div>
            <div class="summary-row">
                <span>"Tax (8.25%)"</span>
                <span>{breakdown.tax_display()}</span>
            </div>
            <div class="summary-row">
                <span>"Shipping"</span>
                <span>"Free"</span>
            </div>
            <div class="summary-row summary-total">
                <strong>"Total"</strong>
                <strong>{breakdown.total_display()}</strong>
            </div>
        </div>
    }
}

// ============================================================================
// Products Page
// ============================================================================

#[component]
fn ProductsPage() -> impl IntoView {
    let service = basket_service();
    let ids = SessionIdentity::new(platform::session_store()).resolve();

    let catalog = StoredValue::new_local(Rc::new(CatalogSession::new(service.clone())));
    let basket = StoredValue::new_local(Rc::new(BasketSession::new(service, ids)));

    let products = RwSignal::new(LoadState::<Vec<Product>>::Loading);
    let notice = RwSignal::new(None::<Notice>);
    let adding = RwSignal::new(HashSet::<ProductId>::new());

    let load = move || {
        spawn_local(async move {
            // `try_` accessors: the page may unmount while a call is in
            // flight, and a settling response must not touch disposed state.
            let Some(session) = catalog.try_get_value() else {
                return;
            };
            session.load().await;
            products.try_set(session.state());
        });
    };
    load();

    let on_add = move |product_id: ProductId| {
        if adding.with_untracked(|a| a.contains(&product_id)) {
            return;
        }
        adding.update(|a| {
            a.insert(product_id.clone());
        });
        spawn_local(async move {
            let Some(session) = basket.try_get_value() else {
                return;
            };
            let token = session.add_product(&product_id).await;
            adding.try_update(|a| {
                a.remove(&product_id);
            });
            notice.try_set(session.notice());
            if let Some(token) = token {
                set_timeout(
                    move || {
                        let Some(session) = basket.try_get_value() else {
                            return;
                        };
                        session.expire_notice(token);
                        notice.try_set(session.notice());
                    },
                    NOTICE_TTL,
                );
            }
        });
    };

    let on_dismiss = move || {
        basket.get_value().dismiss_notice();
        notice.set(None);
    };

    view! {
        <h2>"Products"</h2>
        <NoticeBanner notice on_dismiss/>
        {move || match products.get() {
            LoadState::Loading => view! { <ProductGridSkeleton/> }.into_any(),
            LoadState::Error(message) => view! { <ErrorPanel message on_retry=load/> }.into_any(),
            LoadState::Ready(products) if products.is_empty() => view! {
                <p>"No products available right now."</p>
            }.into_any(),
            LoadState::Ready(products) => view! {
                <div class="products">
                    {products.into_iter().map(|product| view! {
                        <ProductCard product adding on_add/>
                    }).collect::<Vec<_>>()}
                </div>
            }.into_any(),
        }}
    }
}

#[component]
fn ProductCard<F>(product: Product, adding: RwSignal<HashSet<ProductId>>, on_add: F) -> impl IntoView
where
    F: Fn(ProductId) + Copy + 'static,
{
    let price = product.price_display();
    let product_id = product.product_id.clone();
    let busy = {
        let product_id = product_id.clone();
        move || adding.with(|a| a.contains(&product_id))
    };
    let label = busy.clone();

    view! {
        <div class="product-card">
            {match product.image_url.clone() {
                Some(src) => view! { <img src=src alt=product.product_name.clone()/> }.into_any(),
                None => view! { <div class="product-placeholder"></div> }.into_any(),
            }}
            <div class="product-info">
                <h3>{product.product_name.clone()}</h3>
                {product.category.clone().map(|category| view! {
                    <p class="category">{category}</p>
                })}
                <p class="price">{price}</p>
                <button
                    class="btn"
                    disabled=busy
                    on:click=move |_| on_add(product_id.clone())
                >
                    {move || if label() { "Adding..." } else { "Add to Basket" }}
                </button>
            </div>
        </div>
    }
}

// ============================================================================
// Basket Page
// ============================================================================

#[component]
fn BasketPage() -> impl IntoView {
    let service = basket_service();
    let ids = SessionIdentity::new(platform::session_store()).resolve();
    let basket = StoredValue::new_local(Rc::new(BasketSession::new(service, ids)));

    let snapshot = RwSignal::new(LoadState::<BasketSnapshot>::Loading);
    let notice = RwSignal::new(None::<Notice>);
    let removing = RwSignal::new(HashSet::<ItemId>::new());

    let load = move || {
        spawn_local(async move {
            let Some(session) = basket.try_get_value() else {
                return;
            };
            session.load().await;
            snapshot.try_set(session.state());
        });
    };
    load();

    let on_remove = move |item_id: ItemId| {
        if removing.with_untracked(|r| r.contains(&item_id)) {
            return;
        }
        removing.update(|r| {
            r.insert(item_id.clone());
        });
        spawn_local(async move {
            let Some(session) = basket.try_get_value() else {
                return;
            };
            let token = session.remove_item(&item_id).await;
            removing.try_update(|r| {
                r.remove(&item_id);
            });
            snapshot.try_set(session.state());
            notice.try_set(session.notice());
            if let Some(token) = token {
                set_timeout(
                    move || {
                        let Some(session) = basket.try_get_value() else {
                            return;
                        };
                        session.expire_notice(token);
                        notice.try_set(session.notice());
                    },
                    NOTICE_TTL,
                );
            }
        });
    };

    let on_dismiss = move || {
        basket.get_value().dismiss_notice();
        notice.set(None);
    };

    view! {
        <h2>"Shopping Basket"</h2>
        <NoticeBanner notice on_dismiss/>
        {move || match snapshot.get() {
            LoadState::Loading => view! { <BasketSkeleton/> }.into_any(),
            LoadState::Error(message) => view! { <ErrorPanel message on_retry=load/> }.into_any(),
            LoadState::Ready(snapshot) if snapshot.is_empty() => view! {
                <p>"Your basket is empty."</p>
                <a href="/">"Continue shopping"</a>
            }.into_any(),
            LoadState::Ready(snapshot) => view! {
                <div class="basket">
                    <p class="muted">
                        {snapshot.item_count.to_string()} " item(s) in your basket"
                        {(!snapshot.last_updated_at.is_empty())
                            .then(|| format!(" - updated {}", snapshot.last_updated_at))}
                    </p>
                    {snapshot.items.iter().map(|item| {
                        let item_id = item.item_id.clone();
                        let busy = {
                            let item_id = item_id.clone();
                            move || removing.with(|r| r.contains(&item_id))
                        };
                        let label = busy.clone();
                        view! {
                            <div class="basket-row">
                                <div>
                                    <strong>{item.product_name.clone()}</strong>
                                    <p class="muted">
                                        {item.price_display()} " x " {item.quantity_or_one().to_string()}
                                    </p>
                                </div>
                                <button
                                    class="btn btn-danger"
                                    disabled=busy
                                    on:click=move |_| on_remove(item_id.clone())
                                >
                                    {move || if label() { "Removing..." } else { "Remove" }}
                                </button>
                            </div>
                        }
                    }).collect::<Vec<_>>()}
                    <OrderSummary snapshot/>
                    <a href="/checkout" class="btn">"Proceed to Checkout"</a>
                </div>
            }.into_any(),
        }}
    }
}

// ============================================================================
// Checkout Page
// ============================================================================

#[component]
fn CheckoutPage() -> impl IntoView {
    let service = basket_service();
    let flow = StoredValue::new_local(Rc::new(CheckoutFlow::new(
        service,
        SimulatedGateway,
        SessionIdentity::new(platform::session_store()),
    )));

    let phase = RwSignal::new(CheckoutPhase::Loading);
    let validation = RwSignal::new(ValidationErrors::default());
    let payment_error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let sync = move || {
        let Some(flow) = flow.try_get_value() else {
            return;
        };
        phase.try_set(flow.phase());
        validation.try_set(flow.validation());
        payment_error.try_set(flow.payment_error());
    };

    let load = move || {
        spawn_local(async move {
            let Some(flow) = flow.try_get_value() else {
                return;
            };
            flow.load().await;
            sync();
        });
    };
    load();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let card_number = RwSignal::new(String::new());
    let expiry = RwSignal::new(String::new());
    let cvv = RwSignal::new(String::new());
    let accept_terms = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let form = PaymentForm {
            first_name: first_name.get_untracked(),
            last_name: last_name.get_untracked(),
            email: email.get_untracked(),
            card_number: card_number.get_untracked(),
            expiry: expiry.get_untracked(),
            cvv: cvv.get_untracked(),
            accept_terms: accept_terms.get_untracked(),
        };
        submitting.set(true);
        spawn_local(async move {
            let Some(flow) = flow.try_get_value() else {
                return;
            };
            flow.submit(&form).await;
            submitting.try_set(false);
            sync();
        });
    };

    let navigate = use_navigate();

    view! {
        <h2>"Checkout"</h2>
        {move || {
            let navigate = navigate.clone();
            match phase.get() {
                CheckoutPhase::Loading => view! { <BasketSkeleton/> }.into_any(),
                CheckoutPhase::Error(message) => view! {
                    <ErrorPanel message on_retry=load/>
                }.into_any(),
                CheckoutPhase::Empty => view! {
                    <p>"Your basket is empty."</p>
                    <a href="/">"Browse products"</a>
                }.into_any(),
                CheckoutPhase::Editing(snapshot) | CheckoutPhase::Processing(snapshot) => {
                    let pay_label = PricingBreakdown::for_items(&snapshot.items).total_display();
                    view! {
                        <div class="checkout">
                            <OrderSummary snapshot/>
                            {move || payment_error.get().map(|message| view! {
                                <div class="alert alert-failure" role="alert">{message}</div>
                            })}
                            <form on:submit=on_submit>
                                <FormField label="First Name" field=PaymentField::FirstName value=first_name validation/>
                                <FormField label="Last Name" field=PaymentField::LastName value=last_name validation/>
                                <FormField label="Email" field=PaymentField::Email value=email validation/>
                                <FormField
                                    label="Card Number"
                                    field=PaymentField::CardNumber
                                    value=card_number
                                    validation
                                    placeholder="1234123412341234"
                                />
                                <FormField
                                    label="Expiration"
                                    field=PaymentField::Expiry
                                    value=expiry
                                    validation
                                    placeholder="MM/YY"
                                />
                                <FormField label="CVV" field=PaymentField::Cvv value=cvv validation/>
                                <label class="form-field form-checkbox">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || accept_terms.get()
                                        on:change=move |ev| accept_terms.set(event_target_checked(&ev))
                                    />
                                    <span>"I agree to the terms and conditions"</span>
                                    {move || validation.with(|v| v.message_for(PaymentField::Terms)).map(|message| view! {
                                        <p class="field-error">{message}</p>
                                    })}
                                </label>
                                <button class="btn" type="submit" disabled=move || submitting.get()>
                                    {move || if submitting.get() {
                                        "Processing Payment...".to_string()
                                    } else {
                                        format!("Pay {pay_label}")
                                    }}
                                </button>
                            </form>
                        </div>
                    }.into_any()
                }
                CheckoutPhase::Complete(receipt) => view! {
                    <ReceiptView receipt/>
                    <button
                        class="btn"
                        on:click=move |_| {
                            if flow.get_value().continue_shopping().is_some() {
                                navigate("/", Default::default());
                            }
                        }
                    >
                        "Continue Shopping"
                    </button>
                }.into_any(),
            }
        }}
    }
}

#[component]
fn FormField(
    label: &'static str,
    field: PaymentField,
    value: RwSignal<String>,
    validation: RwSignal<ValidationErrors>,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span>{label}</span>
            <input
                prop:value=move || value.get()
                placeholder=placeholder
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {move || validation.with(|v| v.message_for(field)).map(|message| view! {
                <p class="field-error">{message}</p>
            })}
        </label>
    }
}

/// Confirmation view over the captured receipt.
#[component]
fn ReceiptView(receipt: Receipt) -> impl IntoView {
    view! {
        <div class="receipt">
            <h3>"Payment successful!"</h3>
            <p>"Thank you for your order."</p>
            <OrderSummary snapshot=receipt.snapshot/>
        </div>
    }
}

// ============================================================================
// Skeleton Components (Loading States)
// ============================================================================

#[component]
fn ProductGridSkeleton() -> impl IntoView {
    view! {
        <div class="products">
            <ProductCardSkeleton/>
            <ProductCardSkeleton/>
            <ProductCardSkeleton/>
            <ProductCardSkeleton/>
        </div>
    }
}

#[component]
fn ProductCardSkeleton() -> impl IntoView {
    view! {
        <div class="product-card">
            <div class="skeleton" style="width: 100%; height: 200px;"></div>
            <div class="product-info">
                <div class="skeleton" style="width: 80%; height: 1.5rem; margin-bottom: 0.5rem;"></div>
                <div class="skeleton" style="width: 40%; height: 1.25rem;"></div>
            </div>
        </div>
    }
}

#[component]
fn BasketSkeleton() -> impl IntoView {
    view! {
        <div style="max-width: 600px;">
            <div class="skeleton" style="width: 100%; height: 4rem; margin-bottom: 0.5rem;"></div>
            <div class="skeleton" style="width: 100%; height: 4rem; margin-bottom: 0.5rem;"></div>
            <div class="skeleton" style="width: 100%; height: 4rem;"></div>
        </div>
    }
}
